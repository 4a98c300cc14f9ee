//! Insights service
//!
//! Aggregate statistics for the insights dashboard and the category overview.
//! Both work over at most `stats_fetch_limit` documents per collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use regret_core::{Category, Collection, ListQuery, ReactionKind, Story};
use tracing::instrument;

use crate::dto::{AgeShare, CategoryShare, CategoryStatsResponse, InsightsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Window for "recent" counts
const RECENT_DAYS: i64 = 7;

/// A story with more comments than this counts as popular
const POPULAR_COMMENT_THRESHOLD: u64 = 5;

/// Age buckets in display order
const AGE_BUCKETS: [&str; 6] = ["Under 20", "20-29", "30-39", "40-49", "50-59", "60+"];

fn age_bucket(age: u32) -> &'static str {
    match age {
        0..=19 => AGE_BUCKETS[0],
        20..=29 => AGE_BUCKETS[1],
        30..=39 => AGE_BUCKETS[2],
        40..=49 => AGE_BUCKETS[3],
        50..=59 => AGE_BUCKETS[4],
        _ => AGE_BUCKETS[5],
    }
}

/// Rounded share of `part` in `whole`, in whole percent
fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

fn recent_cutoff() -> DateTime<Utc> {
    Utc::now() - Duration::days(RECENT_DAYS)
}

/// Insights service
pub struct InsightsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InsightsService<'a> {
    /// Create a new InsightsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Community insights: totals, category and age breakdowns, recent activity
    #[instrument(skip(self))]
    pub async fn insights(&self) -> ServiceResult<InsightsResponse> {
        let query = ListQuery::new().limit(self.ctx.feed().stats_fetch_limit);
        let store = self.ctx.store();
        let (stories, comments) = tokio::try_join!(
            store.list(Collection::Regrets, &query),
            store.list(Collection::Comments, &query),
        )?;

        let stories: Vec<Story> = stories.documents.iter().map(Story::from_document).collect();
        let total_stories = stories.len() as u64;
        let total_comments = comments.documents.len() as u64;

        let total_reactions: u64 = stories
            .iter()
            .map(|s| s.reactions.total_of(&ReactionKind::STORY))
            .sum();

        let mut by_category: BTreeMap<Category, u64> = BTreeMap::new();
        let mut by_age: BTreeMap<&'static str, u64> = BTreeMap::new();
        for story in &stories {
            *by_category.entry(story.category).or_default() += 1;
            if let Some(age) = story.age_when_happened.filter(|age| *age > 0) {
                *by_age.entry(age_bucket(age)).or_default() += 1;
            }
        }

        let cutoff = recent_cutoff();
        let recent_activity = stories.iter().filter(|s| s.created_at > cutoff).count() as u64;

        let average_reactions_per_story = if total_stories == 0 {
            0
        } else {
            (total_reactions as f64 / total_stories as f64).round() as u64
        };

        let comments_per_story = if total_stories == 0 {
            0.0
        } else {
            (total_comments as f64 / total_stories as f64 * 10.0).round() / 10.0
        };

        // Ties go to the category listed first
        let most_common_category = Category::ALL
            .into_iter()
            .filter_map(|c| by_category.get(&c).map(|count| (c, *count)))
            .fold(None, |best: Option<(Category, u64)>, (c, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((c, count)),
            })
            .map(|(c, _)| c.into());

        let category_breakdown = Category::ALL
            .into_iter()
            .filter_map(|c| {
                by_category.get(&c).map(|count| CategoryShare {
                    category: c.into(),
                    count: *count,
                    percentage: percentage(*count, total_stories),
                })
            })
            .collect();

        let age_breakdown = AGE_BUCKETS
            .into_iter()
            .filter_map(|range| {
                by_age.get(range).map(|count| AgeShare {
                    range,
                    count: *count,
                    percentage: percentage(*count, total_stories),
                })
            })
            .collect();

        Ok(InsightsResponse {
            total_stories,
            total_comments,
            total_reactions,
            category_breakdown,
            age_breakdown,
            recent_activity,
            average_reactions_per_story,
            comments_per_story,
            most_common_category,
        })
    }

    /// Per-category totals, recent and popular counts, with metadata
    #[instrument(skip(self))]
    pub async fn category_stats(&self) -> ServiceResult<Vec<CategoryStatsResponse>> {
        let query = ListQuery::new().limit(self.ctx.feed().stats_fetch_limit);
        let list = self.ctx.store().list(Collection::Regrets, &query).await?;
        let stories: Vec<Story> = list.documents.iter().map(Story::from_document).collect();
        let cutoff = recent_cutoff();

        Ok(Category::ALL
            .into_iter()
            .map(|category| {
                let in_category = || stories.iter().filter(move |s| s.category == category);
                CategoryStatsResponse {
                    category: category.into(),
                    description: category.description(),
                    total: in_category().count() as u64,
                    recent: in_category().filter(|s| s.created_at > cutoff).count() as u64,
                    popular: in_category()
                        .filter(|s| s.comment_count > POPULAR_COMMENT_THRESHOLD)
                        .count() as u64,
                }
            })
            .collect())
    }
}
