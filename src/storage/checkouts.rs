//! Checkout history repository
//!
//! Global (not group scoped) record of every branch checked out in the
//! repository, fed by the post-checkout hook. Backs the `recent` and
//! `frequent` pickers.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use crate::model::BranchCheckout;
use crate::{Error, Result};

/// How checkout history is ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Most recently checked out first
    Recent,
    /// Most often checked out first
    Frequent,
    /// Both keys, combined as configured by [`RecentFrequentOrder`]
    RecentFrequent,
}

/// Key order of the combined recent-frequent ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecentFrequentOrder {
    /// `checkout_count`, ties broken by `last_checked_out_at`
    #[default]
    CountThenRecency,
    /// `last_checked_out_at`, ties broken by `checkout_count`
    RecencyThenCount,
}

impl RecentFrequentOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecentFrequentOrder::CountThenRecency => "count-then-recency",
            RecentFrequentOrder::RecencyThenCount => "recency-then-count",
        }
    }
}

impl std::str::FromStr for RecentFrequentOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "count-then-recency" | "count" | "frequent" => Ok(RecentFrequentOrder::CountThenRecency),
            "recency-then-count" | "recency" | "recent" => Ok(RecentFrequentOrder::RecencyThenCount),
            _ => Err(Error::Config(format!("unknown recent-frequent order: {}", s))),
        }
    }
}

pub struct CheckoutStore<'a> {
    conn: &'a Connection,
    order: RecentFrequentOrder,
}

impl<'a> CheckoutStore<'a> {
    pub fn new(conn: &'a Connection, order: RecentFrequentOrder) -> Self {
        Self { conn, order }
    }

    /// Record a checkout of `name` happening now.
    pub fn upsert(&self, name: &str, commit_msg: &str) -> Result<()> {
        self.upsert_at(name, commit_msg, Utc::now())
    }

    /// Record a checkout of `name` at `at`.
    ///
    /// A single statement: inserts with a count of 1, or bumps the count and
    /// overwrites the timestamp and commit message of the existing row.
    pub fn upsert_at(&self, name: &str, commit_msg: &str, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO branch_checkouts (name, checkout_count, last_checked_out_at, latest_commit_msg)
            VALUES (?1, 1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                checkout_count = checkout_count + 1,
                last_checked_out_at = excluded.last_checked_out_at,
                latest_commit_msg = excluded.latest_commit_msg
            "#,
            params![name, at, commit_msg],
        )?;
        tracing::debug!(branch = name, "tracked checkout");
        Ok(())
    }

    pub fn get_recent(&self, limit: usize, reverse: bool) -> Result<Vec<BranchCheckout>> {
        self.ranked(Ranking::Recent, limit, reverse)
    }

    pub fn get_frequent(&self, limit: usize, reverse: bool) -> Result<Vec<BranchCheckout>> {
        self.ranked(Ranking::Frequent, limit, reverse)
    }

    pub fn get_recent_frequent(&self, limit: usize, reverse: bool) -> Result<Vec<BranchCheckout>> {
        self.ranked(Ranking::RecentFrequent, limit, reverse)
    }

    /// Top `limit` rows by `ranking`; `reverse` flips every sort key.
    pub fn ranked(&self, ranking: Ranking, limit: usize, reverse: bool) -> Result<Vec<BranchCheckout>> {
        let sql = format!(
            "SELECT id, name, checkout_count, last_checked_out_at, latest_commit_msg \
             FROM branch_checkouts ORDER BY {} LIMIT ?1",
            self.order_clause(ranking, reverse)
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_checkout)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    fn order_clause(&self, ranking: Ranking, reverse: bool) -> String {
        let direction = if reverse { "ASC" } else { "DESC" };
        let keys: &[&str] = match (ranking, self.order) {
            (Ranking::Recent, _) => &["last_checked_out_at"],
            (Ranking::Frequent, _) => &["checkout_count"],
            (Ranking::RecentFrequent, RecentFrequentOrder::CountThenRecency) => {
                &["checkout_count", "last_checked_out_at"]
            }
            (Ranking::RecentFrequent, RecentFrequentOrder::RecencyThenCount) => {
                &["last_checked_out_at", "checkout_count"]
            }
        };

        keys.iter()
            .chain(std::iter::once(&"id"))
            .map(|key| format!("{} {}", key, direction))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Forget all checkout history
    pub fn delete_all(&self) -> Result<()> {
        let deleted = self.conn.execute("DELETE FROM branch_checkouts", [])?;
        tracing::debug!(deleted, "cleared checkout history");
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM branch_checkouts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn row_to_checkout(row: &rusqlite::Row) -> rusqlite::Result<BranchCheckout> {
    Ok(BranchCheckout {
        id: row.get(0)?,
        name: row.get(1)?,
        checkout_count: row.get(2)?,
        last_checked_out_at: row.get(3)?,
        latest_commit_msg: row.get(4)?,
    })
}
