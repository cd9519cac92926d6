//! Embedded AFINN-style valence table.
//!
//! Each entry maps a lowercase token to a polarity weight in [-5, 5].
//! Tokens absent from the table contribute zero to a message's score.

pub(crate) static ENTRIES: &[(&str, f64)] = &[
    ("abandon", -2.0),
    ("abuse", -3.0),
    ("adore", 3.0),
    ("afraid", -2.0),
    ("aggressive", -2.0),
    ("agree", 1.0),
    ("amazing", 4.0),
    ("anger", -3.0),
    ("angry", -3.0),
    ("annoy", -2.0),
    ("annoyed", -2.0),
    ("annoying", -2.0),
    ("anxious", -2.0),
    ("appreciate", 2.0),
    ("arrogant", -2.0),
    ("ashamed", -2.0),
    ("awesome", 4.0),
    ("awful", -3.0),
    ("bad", -3.0),
    ("beautiful", 3.0),
    ("benefit", 2.0),
    ("best", 3.0),
    ("better", 2.0),
    ("blame", -2.0),
    ("bored", -2.0),
    ("boring", -3.0),
    ("brilliant", 4.0),
    ("broken", -1.0),
    ("calm", 2.0),
    ("care", 2.0),
    ("celebrate", 3.0),
    ("charm", 3.0),
    ("cheerful", 2.0),
    ("clean", 2.0),
    ("comfort", 2.0),
    ("comfortable", 2.0),
    ("complain", -2.0),
    ("confident", 2.0),
    ("confused", -2.0),
    ("cool", 1.0),
    ("crap", -3.0),
    ("crash", -2.0),
    ("crazy", -2.0),
    ("cruel", -3.0),
    ("cry", -1.0),
    ("damn", -4.0),
    ("dead", -3.0),
    ("defeat", -2.0),
    ("delight", 3.0),
    ("delighted", 3.0),
    ("depressed", -2.0),
    ("desperate", -3.0),
    ("destroy", -3.0),
    ("difficult", -1.0),
    ("dirty", -2.0),
    ("disappoint", -2.0),
    ("disappointed", -2.0),
    ("disappointing", -2.0),
    ("disaster", -2.0),
    ("disgusting", -3.0),
    ("dislike", -2.0),
    ("distrust", -3.0),
    ("doubt", -1.0),
    ("dread", -2.0),
    ("dumb", -3.0),
    ("eager", 2.0),
    ("easy", 1.0),
    ("embarrassed", -2.0),
    ("empty", -1.0),
    ("encourage", 2.0),
    ("enjoy", 2.0),
    ("enjoyed", 2.0),
    ("enthusiastic", 3.0),
    ("evil", -3.0),
    ("excellent", 3.0),
    ("excited", 3.0),
    ("exciting", 3.0),
    ("fail", -2.0),
    ("failed", -2.0),
    ("failure", -2.0),
    ("fake", -3.0),
    ("fantastic", 4.0),
    ("fear", -2.0),
    ("fine", 2.0),
    ("fraud", -4.0),
    ("free", 1.0),
    ("fresh", 1.0),
    ("friendly", 2.0),
    ("frustrated", -2.0),
    ("frustrating", -2.0),
    ("fun", 4.0),
    ("funny", 4.0),
    ("generous", 2.0),
    ("glad", 3.0),
    ("good", 3.0),
    ("grateful", 3.0),
    ("great", 3.0),
    ("greed", -3.0),
    ("grief", -2.0),
    ("happy", 3.0),
    ("hate", -3.0),
    ("hated", -3.0),
    ("hates", -3.0),
    ("hell", -4.0),
    ("help", 2.0),
    ("helpful", 2.0),
    ("helpless", -2.0),
    ("hope", 2.0),
    ("hopeful", 2.0),
    ("hopeless", -2.0),
    ("horrible", -3.0),
    ("hurt", -2.0),
    ("ignore", -1.0),
    ("impressed", 3.0),
    ("impressive", 3.0),
    ("interesting", 2.0),
    ("jealous", -2.0),
    ("joy", 3.0),
    ("kind", 2.0),
    ("lazy", -1.0),
    ("like", 2.0),
    ("liked", 2.0),
    ("likes", 2.0),
    ("lonely", -2.0),
    ("lose", -3.0),
    ("loss", -3.0),
    ("lost", -3.0),
    ("love", 3.0),
    ("loved", 3.0),
    ("lovely", 3.0),
    ("loves", 3.0),
    ("loving", 2.0),
    ("lucky", 3.0),
    ("mad", -3.0),
    ("miserable", -3.0),
    ("miss", -2.0),
    ("mistake", -2.0),
    ("nasty", -3.0),
    ("nice", 3.0),
    ("noisy", -1.0),
    ("outstanding", 5.0),
    ("pain", -2.0),
    ("painful", -2.0),
    ("panic", -3.0),
    ("peace", 2.0),
    ("perfect", 3.0),
    ("pleasant", 3.0),
    ("please", 1.0),
    ("pleased", 3.0),
    ("poor", -2.0),
    ("positive", 2.0),
    ("powerful", 2.0),
    ("pretty", 1.0),
    ("problem", -2.0),
    ("proud", 2.0),
    ("rage", -2.0),
    ("reject", -1.0),
    ("relax", 2.0),
    ("rich", 2.0),
    ("rude", -2.0),
    ("sad", -2.0),
    ("sadly", -2.0),
    ("safe", 1.0),
    ("satisfied", 2.0),
    ("scare", -2.0),
    ("scared", -2.0),
    ("scary", -2.0),
    ("sick", -2.0),
    ("smart", 1.0),
    ("smile", 2.0),
    ("sorry", -1.0),
    ("strong", 2.0),
    ("stupid", -2.0),
    ("success", 2.0),
    ("successful", 3.0),
    ("suck", -3.0),
    ("sucks", -3.0),
    ("super", 3.0),
    ("superb", 5.0),
    ("support", 2.0),
    ("sweet", 2.0),
    ("terrible", -3.0),
    ("terrific", 4.0),
    ("thank", 2.0),
    ("thanks", 2.0),
    ("tired", -2.0),
    ("tragedy", -2.0),
    ("trust", 1.0),
    ("ugly", -3.0),
    ("unhappy", -2.0),
    ("upset", -2.0),
    ("useful", 2.0),
    ("useless", -2.0),
    ("warm", 1.0),
    ("weak", -2.0),
    ("welcome", 2.0),
    ("win", 4.0),
    ("winner", 4.0),
    ("won", 3.0),
    ("wonderful", 4.0),
    ("worried", -3.0),
    ("worry", -3.0),
    ("worse", -3.0),
    ("worst", -3.0),
    ("wow", 4.0),
    ("wrong", -2.0),
];
