//! The engine's only I/O boundary.
//!
//! `DatasetProvider` hands the engine a fully materialized, strongly typed
//! snapshot of one diagram's history; everything downstream is a pure
//! in-memory computation. The Mongo implementation applies the inclusive
//! `createdAt` range filter and nothing else — mode partitioning happens in
//! the engine.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Database,
};
use serde::Deserialize;

use crate::models::{ClaimTotals, TestSession, UserRef};
use crate::utils::time::chrono_to_bson;

/// Inclusive date bounds; `from`-only and `to`-only are both supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Snapshot of everything the engine needs for one diagram.
#[derive(Debug, Clone, Default)]
pub struct DiagramDataset {
    /// Ordered by `created_at` ascending.
    pub sessions: Vec<TestSession>,
    /// Claim totals keyed by question id.
    pub claims: HashMap<String, ClaimTotals>,
    /// Average rating keyed by question id.
    pub ratings: HashMap<String, f64>,
    /// Display names for the users appearing in `sessions`.
    pub users: HashMap<String, UserRef>,
}

#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn fetch(&self, diagram_id: &str, range: &DateRange) -> Result<DiagramDataset>;

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// Typed row shapes for the aggregate collections, so nothing downstream
// touches raw documents.
#[derive(Debug, Deserialize)]
struct ClaimRow {
    question_id: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    question_id: Option<String>,
    value: f64,
}

pub struct MongoDatasetLoader {
    mongo: Database,
}

impl MongoDatasetLoader {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    async fn load_sessions(
        &self,
        diagram_id: &str,
        range: &DateRange,
    ) -> Result<Vec<TestSession>> {
        let mut filter = doc! { "diagram_id": diagram_id };
        let mut created = Document::new();
        if let Some(from) = range.from {
            created.insert("$gte", chrono_to_bson(from));
        }
        if let Some(to) = range.to {
            created.insert("$lte", chrono_to_bson(to));
        }
        if !created.is_empty() {
            filter.insert("createdAt", created);
        }

        let cursor = self
            .mongo
            .collection::<TestSession>("test_sessions")
            .find(filter)
            .sort(doc! { "createdAt": 1 })
            .await
            .context("Failed to query test sessions")?;

        cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Test session cursor failure: {}", e))
    }

    async fn load_claim_totals(&self, diagram_id: &str) -> Result<HashMap<String, ClaimTotals>> {
        let mut cursor = self
            .mongo
            .collection::<ClaimRow>("claims")
            .find(doc! { "diagram_id": diagram_id })
            .await
            .context("Failed to query claims")?;

        let mut totals: HashMap<String, ClaimTotals> = HashMap::new();
        while let Some(claim) = cursor
            .try_next()
            .await
            .map_err(|e| anyhow!("Claim cursor failure: {}", e))?
        {
            let Some(question_id) = claim.question_id else {
                continue;
            };
            let entry = totals.entry(question_id).or_default();
            entry.total += 1;
            if claim.status == "approved" {
                entry.approved += 1;
            }
        }

        Ok(totals)
    }

    async fn load_rating_averages(&self, diagram_id: &str) -> Result<HashMap<String, f64>> {
        let mut cursor = self
            .mongo
            .collection::<RatingRow>("ratings")
            .find(doc! { "diagram_id": diagram_id })
            .await
            .context("Failed to query ratings")?;

        let mut sums: HashMap<String, (f64, u64)> = HashMap::new();
        while let Some(rating) = cursor
            .try_next()
            .await
            .map_err(|e| anyhow!("Rating cursor failure: {}", e))?
        {
            let Some(question_id) = rating.question_id else {
                continue;
            };
            let entry = sums.entry(question_id).or_insert((0.0, 0));
            entry.0 += rating.value;
            entry.1 += 1;
        }

        Ok(sums
            .into_iter()
            .map(|(question_id, (sum, count))| (question_id, sum / count as f64))
            .collect())
    }

    async fn load_user_refs(&self, user_ids: &[String]) -> Result<HashMap<String, UserRef>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut cursor = self
            .mongo
            .collection::<UserRef>("users")
            .find(doc! { "_id": { "$in": user_ids } })
            .await
            .context("Failed to query users for analytics")?;

        let mut users = HashMap::new();
        while let Some(user) = cursor
            .try_next()
            .await
            .map_err(|e| anyhow!("User cursor failure: {}", e))?
        {
            users.insert(user.id.clone(), user);
        }

        Ok(users)
    }
}

#[async_trait]
impl DatasetProvider for MongoDatasetLoader {
    async fn fetch(&self, diagram_id: &str, range: &DateRange) -> Result<DiagramDataset> {
        let sessions = self.load_sessions(diagram_id, range).await?;

        let mut user_ids: Vec<String> = sessions.iter().map(|s| s.user_id.clone()).collect();
        user_ids.sort();
        user_ids.dedup();

        let claims = self.load_claim_totals(diagram_id).await?;
        let ratings = self.load_rating_averages(diagram_id).await?;
        let users = self.load_user_refs(&user_ids).await?;

        tracing::debug!(
            "Loaded analytics dataset for diagram {}: {} sessions, {} users",
            diagram_id,
            sessions.len(),
            users.len()
        );

        Ok(DiagramDataset {
            sessions,
            claims,
            ratings,
            users,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.mongo
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}
