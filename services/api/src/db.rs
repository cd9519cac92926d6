//! Conversation Ledger
//!
//! This module contains all the functions for interacting with the SQLite
//! database: the mutating operations driven by relay sessions (create,
//! append, finalize), feedback writes, and the read-only analytics queries.
//! Queries are runtime-checked so the crate builds without a live database;
//! the schema is created with idempotent DDL at startup.
//!
//! The append path is a full-record read-modify-write: it reloads the
//! message sequence and recomputes the running sentiment mean inside one
//! transaction. That is safe only under the invariant that a conversation id
//! has exactly one concurrent writer, the relay session that created it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use palaver_core::sentiment::Sentiment;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{
    Conversation, ConversationFeedback, ConversationMetrics, EmotionalState, FeedbackSummary,
    LabelCount, MessageRole, MetricsSummary, MoodCount, SentimentPoint, StoredMessage,
};

const CONVERSATION_COLUMNS: &str = "id, config_id, agent_id, started_at, ended_at, \
     duration_seconds, total_turns, interruptions, overall_sentiment, \
     sentiment_trend, emotional_states";

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS conversations (
        id BLOB PRIMARY KEY,
        config_id TEXT,
        agent_id TEXT NOT NULL,
        started_at TEXT NOT NULL,
        ended_at TEXT,
        duration_seconds INTEGER,
        total_turns INTEGER NOT NULL DEFAULT 0,
        interruptions INTEGER NOT NULL DEFAULT 0,
        overall_sentiment REAL NOT NULL DEFAULT 0,
        sentiment_trend TEXT NOT NULL DEFAULT '[]',
        emotional_states TEXT NOT NULL DEFAULT '[]'
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        conversation_id BLOB NOT NULL REFERENCES conversations(id),
        role TEXT NOT NULL,
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        sentiment TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_messages_conversation
        ON messages(conversation_id)",
    "CREATE TABLE IF NOT EXISTS conversation_metrics (
        conversation_id BLOB PRIMARY KEY REFERENCES conversations(id),
        avg_response_time REAL NOT NULL,
        user_engagement_score REAL NOT NULL,
        completion_rate REAL NOT NULL,
        successful_interruptions INTEGER NOT NULL,
        failed_interruptions INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS conversation_feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        conversation_id BLOB NOT NULL REFERENCES conversations(id),
        rating INTEGER NOT NULL,
        feedback TEXT NOT NULL,
        sentiment TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

/// A wrapper around the SQLite pool providing the ledger interface.
#[derive(Clone)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url` and applies the
    /// schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{url}'"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("failed to open database")?;
        let ledger = Self::new(pool);
        ledger.init_schema().await?;
        Ok(ledger)
    }

    /// An isolated in-memory ledger, used by tests.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // A single connection so every query sees the same in-memory file.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let ledger = Self::new(pool);
        ledger.init_schema().await?;
        Ok(ledger)
    }

    /// Applies the idempotent schema DDL.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Creates a new conversation record with `started_at = now`.
    pub async fn create_conversation(
        &self,
        agent_id: &str,
        config_id: Option<&str>,
    ) -> Result<Conversation> {
        let conversation = Conversation {
            id: Uuid::new_v4(),
            config_id: config_id.map(str::to_string),
            agent_id: agent_id.to_string(),
            started_at: Utc::now(),
            ended_at: None,
            duration_seconds: None,
            total_turns: 0,
            interruptions: 0,
            overall_sentiment: 0.0,
            sentiment_trend: Json(Vec::new()),
            emotional_states: Json(Vec::new()),
        };
        sqlx::query(
            "INSERT INTO conversations (id, config_id, agent_id, started_at) VALUES (?, ?, ?, ?)",
        )
        .bind(conversation.id)
        .bind(&conversation.config_id)
        .bind(&conversation.agent_id)
        .bind(conversation.started_at)
        .execute(&self.pool)
        .await?;
        Ok(conversation)
    }

    /// Appends one message and folds it into the conversation's aggregates.
    ///
    /// Reads the stored message sequence, recomputes `overall_sentiment` as
    /// the mean of all scored messages (unscored messages are excluded from
    /// the mean, not treated as zero), pushes one snapshot onto the
    /// sentiment-trend and emotional-state sequences, and bumps the turn
    /// counter, all in one transaction.
    pub async fn append_message(
        &self,
        conversation_id: Uuid,
        role: MessageRole,
        content: &str,
        sentiment: Option<Sentiment>,
    ) -> Result<StoredMessage> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?"
        );
        let conversation: Conversation = sqlx::query_as(&query)
            .bind(conversation_id)
            .fetch_optional(&mut *tx)
            .await?
            .with_context(|| format!("conversation '{conversation_id}' not found"))?;

        let timestamp = Utc::now();
        let inserted = sqlx::query(
            "INSERT INTO messages (conversation_id, role, content, timestamp, sentiment)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(conversation_id)
        .bind(role)
        .bind(content)
        .bind(timestamp)
        .bind(sentiment.map(Json))
        .execute(&mut *tx)
        .await?;

        let scores: Vec<Json<Sentiment>> = sqlx::query_scalar(
            "SELECT sentiment FROM messages
             WHERE conversation_id = ? AND sentiment IS NOT NULL",
        )
        .bind(conversation_id)
        .fetch_all(&mut *tx)
        .await?;
        let overall_sentiment = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.0.score).sum::<f64>() / scores.len() as f64
        };

        let mut trend = conversation.sentiment_trend.0;
        let mut states = conversation.emotional_states.0;
        if let Some(s) = sentiment {
            trend.push(SentimentPoint {
                timestamp,
                score: s.score,
            });
            states.push(EmotionalState {
                timestamp,
                score: s.score,
                mood: s.mood,
            });
        }

        sqlx::query(
            "UPDATE conversations
             SET total_turns = total_turns + 1,
                 overall_sentiment = ?,
                 sentiment_trend = ?,
                 emotional_states = ?
             WHERE id = ?",
        )
        .bind(overall_sentiment)
        .bind(Json(trend))
        .bind(Json(states))
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StoredMessage {
            id: inserted.last_insert_rowid(),
            conversation_id,
            role,
            content: content.to_string(),
            timestamp,
            sentiment: sentiment.map(Json),
        })
    }

    /// Finalizes a conversation: sets `ended_at`, computes the duration, and
    /// writes the metrics row.
    ///
    /// Idempotent: returns `false` without touching anything when the
    /// conversation is already finalized (or unknown), so a duplicate close
    /// signal is a no-op.
    pub async fn finalize_conversation(&self, conversation_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations
             WHERE id = ? AND ended_at IS NULL"
        );
        let Some(conversation) = sqlx::query_as::<_, Conversation>(&query)
            .bind(conversation_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(false);
        };

        let ended_at = Utc::now();
        let duration_seconds = (ended_at - conversation.started_at).num_seconds().max(0);
        sqlx::query(
            "UPDATE conversations SET ended_at = ?, duration_seconds = ?
             WHERE id = ? AND ended_at IS NULL",
        )
        .bind(ended_at)
        .bind(duration_seconds)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await?;

        let turns = conversation.total_turns;
        let metrics = ConversationMetrics {
            conversation_id,
            avg_response_time: duration_seconds as f64 / turns.max(1) as f64,
            user_engagement_score: (turns as f64 * 20.0).min(100.0),
            completion_rate: 100.0,
            successful_interruptions: 0,
            failed_interruptions: 0,
        };
        sqlx::query(
            "INSERT OR IGNORE INTO conversation_metrics
                (conversation_id, avg_response_time, user_engagement_score,
                 completion_rate, successful_interruptions, failed_interruptions)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(metrics.conversation_id)
        .bind(metrics.avg_response_time)
        .bind(metrics.user_engagement_score)
        .bind(metrics.completion_rate)
        .bind(metrics.successful_interruptions)
        .bind(metrics.failed_interruptions)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Retrieves a single conversation by id.
    pub async fn get_conversation(&self, conversation_id: Uuid) -> Result<Option<Conversation>> {
        let query = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?");
        let conversation = sqlx::query_as(&query)
            .bind(conversation_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(conversation)
    }

    /// The id of the most recently started conversation, if any.
    pub async fn latest_conversation_id(&self) -> Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            "SELECT id FROM conversations ORDER BY started_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    /// Retrieves a conversation's messages in chronological order.
    pub async fn get_messages(&self, conversation_id: Uuid) -> Result<Vec<StoredMessage>> {
        let messages = sqlx::query_as(
            "SELECT id, conversation_id, role, content, timestamp, sentiment
             FROM messages WHERE conversation_id = ? ORDER BY id ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Retrieves the metrics row for a conversation, if finalized.
    pub async fn get_metrics(&self, conversation_id: Uuid) -> Result<Option<ConversationMetrics>> {
        let metrics = sqlx::query_as(
            "SELECT conversation_id, avg_response_time, user_engagement_score,
                    completion_rate, successful_interruptions, failed_interruptions
             FROM conversation_metrics WHERE conversation_id = ?",
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(metrics)
    }

    /// Stores one feedback row.
    pub async fn add_feedback(
        &self,
        conversation_id: Uuid,
        rating: i64,
        feedback: &str,
        sentiment_label: &str,
    ) -> Result<ConversationFeedback> {
        let created_at = Utc::now();
        let inserted = sqlx::query(
            "INSERT INTO conversation_feedback
                (conversation_id, rating, feedback, sentiment, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(conversation_id)
        .bind(rating)
        .bind(feedback)
        .bind(sentiment_label)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(ConversationFeedback {
            id: inserted.last_insert_rowid(),
            conversation_id,
            rating,
            feedback: feedback.to_string(),
            sentiment: sentiment_label.to_string(),
            created_at,
        })
    }

    /// Aggregates dashboard metrics over conversations started inside the
    /// optional `[start, end]` range. Returns zeroed/empty defaults when
    /// nothing matches.
    pub async fn metrics_summary(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<MetricsSummary> {
        let query = format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations
             WHERE (?1 IS NULL OR started_at >= ?1)
               AND (?2 IS NULL OR started_at <= ?2)
             ORDER BY started_at ASC"
        );
        let conversations: Vec<Conversation> = sqlx::query_as(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        if conversations.is_empty() {
            return Ok(MetricsSummary::default());
        }

        let engagement_scores: Vec<f64> = sqlx::query_scalar(
            "SELECT m.user_engagement_score
             FROM conversation_metrics m
             JOIN conversations c ON c.id = m.conversation_id
             WHERE (?1 IS NULL OR c.started_at >= ?1)
               AND (?2 IS NULL OR c.started_at <= ?2)",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let durations: Vec<i64> = conversations
            .iter()
            .filter_map(|c| c.duration_seconds)
            .collect();

        let mut trend: Vec<SentimentPoint> = Vec::new();
        let mut mood_counts: BTreeMap<String, i64> = BTreeMap::new();
        for conversation in &conversations {
            trend.extend(conversation.sentiment_trend.0.iter().cloned());
            for state in &conversation.emotional_states.0 {
                *mood_counts.entry(state.mood.to_string()).or_insert(0) += 1;
            }
        }
        trend.sort_by_key(|point| point.timestamp);

        Ok(MetricsSummary {
            total_conversations: conversations.len() as i64,
            avg_duration: mean(durations.iter().map(|d| *d as f64)),
            avg_engagement_score: mean(engagement_scores.iter().copied()),
            avg_sentiment: mean(conversations.iter().map(|c| c.overall_sentiment)),
            sentiment_trend: trend,
            emotional_state_distribution: mood_counts
                .into_iter()
                .map(|(mood, count)| MoodCount { mood, count })
                .collect(),
        })
    }

    /// Feedback rollup: per-label counts plus the `limit` most recent rows.
    pub async fn feedback_summary(&self, limit: i64) -> Result<FeedbackSummary> {
        let distribution: Vec<(String, i64)> = sqlx::query_as(
            "SELECT sentiment, COUNT(*) FROM conversation_feedback
             GROUP BY sentiment ORDER BY sentiment ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        let recent_feedback = sqlx::query_as(
            "SELECT id, conversation_id, rating, feedback, sentiment, created_at
             FROM conversation_feedback ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(FeedbackSummary {
            sentiment_distribution: distribution
                .into_iter()
                .map(|(sentiment, count)| LabelCount { sentiment, count })
                .collect(),
            recent_feedback,
        })
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use palaver_core::sentiment::SentimentAnalyzer;

    async fn ledger() -> Ledger {
        Ledger::in_memory().await.expect("in-memory ledger")
    }

    #[tokio::test]
    async fn append_recomputes_overall_sentiment_as_mean() {
        let ledger = ledger().await;
        let analyzer = SentimentAnalyzer::new();
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();

        let texts = ["I love this!", "this is terrible", "okay then"];
        let mut expected = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            let sentiment = analyzer.score(text);
            expected.push(sentiment.score);
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            ledger
                .append_message(conversation.id, role, text, Some(sentiment))
                .await
                .unwrap();
        }

        let stored = ledger
            .get_conversation(conversation.id)
            .await
            .unwrap()
            .unwrap();
        let mean = expected.iter().sum::<f64>() / expected.len() as f64;
        assert_relative_eq!(stored.overall_sentiment, mean, epsilon = 1e-9);
        assert_eq!(stored.total_turns, 3);
        assert_eq!(stored.sentiment_trend.0.len(), 3);
        assert_eq!(stored.emotional_states.0.len(), 3);
    }

    #[tokio::test]
    async fn unscored_messages_are_excluded_from_the_mean() {
        let ledger = ledger().await;
        let analyzer = SentimentAnalyzer::new();
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();

        let sentiment = analyzer.score("I love this!");
        ledger
            .append_message(conversation.id, MessageRole::User, "I love this!", Some(sentiment))
            .await
            .unwrap();
        ledger
            .append_message(conversation.id, MessageRole::Assistant, "status", None)
            .await
            .unwrap();

        let stored = ledger
            .get_conversation(conversation.id)
            .await
            .unwrap()
            .unwrap();
        // The unscored message counts as a turn but not toward the mean.
        assert_relative_eq!(stored.overall_sentiment, sentiment.score, epsilon = 1e-9);
        assert_eq!(stored.total_turns, 2);
        assert_eq!(stored.sentiment_trend.0.len(), 1);
    }

    #[tokio::test]
    async fn append_to_unknown_conversation_fails() {
        let ledger = ledger().await;
        let result = ledger
            .append_message(Uuid::new_v4(), MessageRole::User, "hi", None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn finalize_writes_metrics_exactly_once() {
        let ledger = ledger().await;
        let analyzer = SentimentAnalyzer::new();
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
        for text in ["hello", "hi there"] {
            ledger
                .append_message(
                    conversation.id,
                    MessageRole::User,
                    text,
                    Some(analyzer.score(text)),
                )
                .await
                .unwrap();
        }

        assert!(ledger.finalize_conversation(conversation.id).await.unwrap());
        assert!(!ledger.finalize_conversation(conversation.id).await.unwrap());

        let stored = ledger
            .get_conversation(conversation.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.ended_at.is_some());
        assert!(stored.duration_seconds.unwrap() >= 0);

        let metrics = ledger
            .get_metrics(conversation.id)
            .await
            .unwrap()
            .expect("metrics row");
        assert_relative_eq!(metrics.completion_rate, 100.0);
        assert_relative_eq!(metrics.user_engagement_score, 40.0);
        assert_eq!(metrics.successful_interruptions, 0);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conversation_metrics")
            .fetch_one(&ledger.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn finalize_with_no_turns_divides_by_one() {
        let ledger = ledger().await;
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
        assert!(ledger.finalize_conversation(conversation.id).await.unwrap());

        let metrics = ledger
            .get_metrics(conversation.id)
            .await
            .unwrap()
            .expect("metrics row");
        assert_relative_eq!(metrics.user_engagement_score, 0.0);
        assert!(metrics.avg_response_time >= 0.0);
    }

    #[tokio::test]
    async fn finalize_unknown_conversation_is_a_noop() {
        let ledger = ledger().await;
        assert!(!ledger.finalize_conversation(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn metrics_summary_on_empty_dataset_is_zeroed() {
        let ledger = ledger().await;
        let summary = ledger.metrics_summary(None, None).await.unwrap();
        assert_eq!(summary.total_conversations, 0);
        assert_relative_eq!(summary.avg_duration, 0.0);
        assert!(summary.sentiment_trend.is_empty());
        assert!(summary.emotional_state_distribution.is_empty());
    }

    #[tokio::test]
    async fn metrics_summary_aggregates_and_orders_the_trend() {
        let ledger = ledger().await;
        let analyzer = SentimentAnalyzer::new();
        for texts in [
            vec!["I love this!", "great stuff"],
            vec!["this is terrible"],
        ] {
            let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
            for text in texts {
                ledger
                    .append_message(
                        conversation.id,
                        MessageRole::User,
                        text,
                        Some(analyzer.score(text)),
                    )
                    .await
                    .unwrap();
            }
            ledger.finalize_conversation(conversation.id).await.unwrap();
        }

        let summary = ledger.metrics_summary(None, None).await.unwrap();
        assert_eq!(summary.total_conversations, 2);
        assert_eq!(summary.sentiment_trend.len(), 3);
        assert!(
            summary
                .sentiment_trend
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp)
        );
        let moods: Vec<&str> = summary
            .emotional_state_distribution
            .iter()
            .map(|bucket| bucket.mood.as_str())
            .collect();
        assert_eq!(moods, vec!["negative", "positive"]);
        let positive = &summary.emotional_state_distribution[1];
        assert_eq!(positive.count, 2);
        assert!(summary.avg_engagement_score > 0.0);
    }

    #[tokio::test]
    async fn metrics_summary_respects_the_date_filter() {
        let ledger = ledger().await;
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
        ledger.finalize_conversation(conversation.id).await.unwrap();

        let future = Utc::now() + chrono::Duration::days(1);
        let summary = ledger.metrics_summary(Some(future), None).await.unwrap();
        assert_eq!(summary.total_conversations, 0);

        let past = Utc::now() - chrono::Duration::days(1);
        let summary = ledger.metrics_summary(Some(past), None).await.unwrap();
        assert_eq!(summary.total_conversations, 1);
    }

    #[tokio::test]
    async fn feedback_summary_counts_labels_and_limits_recent_rows() {
        let ledger = ledger().await;
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
        for (rating, label) in [(5, "positive"), (4, "positive"), (1, "negative")] {
            ledger
                .add_feedback(conversation.id, rating, "some words", label)
                .await
                .unwrap();
        }

        let summary = ledger.feedback_summary(2).await.unwrap();
        assert_eq!(summary.recent_feedback.len(), 2);
        assert_eq!(
            summary.sentiment_distribution,
            vec![
                LabelCount {
                    sentiment: "negative".to_string(),
                    count: 1
                },
                LabelCount {
                    sentiment: "positive".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn latest_conversation_id_orders_by_start() {
        let ledger = ledger().await;
        assert!(ledger.latest_conversation_id().await.unwrap().is_none());

        ledger.create_conversation("agent-1", None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = ledger.create_conversation("agent-2", None).await.unwrap();

        assert_eq!(
            ledger.latest_conversation_id().await.unwrap(),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn messages_come_back_in_insertion_order() {
        let ledger = ledger().await;
        let conversation = ledger.create_conversation("agent-1", None).await.unwrap();
        for text in ["one", "two", "three"] {
            ledger
                .append_message(conversation.id, MessageRole::User, text, None)
                .await
                .unwrap();
        }
        let messages = ledger.get_messages(conversation.id).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }
}
