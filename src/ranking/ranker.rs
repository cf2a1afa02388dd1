/// Parent-level match aggregation
///
/// Collapses the chunk-level matches of a document onto the parent documents
/// they belong to. Matches are grouped by parent key, each group is reduced to
/// one representative according to the ranking policy, and the representatives
/// are sorted into the document's final match list.
///
/// Which match donates tags to a group depends on the policy: `min`/`max`
/// take the best-scoring member, the mean policies take the first member in
/// key order and overwrite its score with the group mean.

use std::borrow::Cow;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::access_path::{select_mut, AccessPaths};
use crate::config::RankerConfig;
use crate::document::{Document, Match};
use crate::errors::RankerError;
use crate::executor::{Executor, Parameters, SEARCH_ENDPOINT};
use super::policy::RankingPolicy;

/// Per-call parameter that overrides the configured access paths.
pub const ACCESS_PATHS_PARAM: &str = "access_paths";

/// Aggregates and ranks matches for the documents an access path selects.
///
/// Configuration is fixed at construction and read-only afterwards, so one
/// ranker can serve concurrent batches.
#[derive(Debug, Clone)]
pub struct Ranker {
    metric: String,
    ranking: RankingPolicy,
    access_paths: AccessPaths,
}

/// A pool entry with its metric score already looked up.
struct Scored<'a> {
    score: f64,
    item: &'a Match,
}

impl Ranker {
    /// Build a ranker, failing fast on an unknown ranking policy.
    ///
    /// The deprecated `traversal_paths` setting wins over `access_paths` and
    /// is reported once here.
    pub fn new(config: &RankerConfig) -> Result<Self, RankerError> {
        let ranking: RankingPolicy = config.ranking.parse()?;

        let (paths, legacy) = config.resolved_access_paths();
        if legacy {
            tracing::warn!(
                traversal_paths = %paths,
                "'traversal_paths' will be deprecated in the future, please use 'access_paths'"
            );
        }

        tracing::info!(
            metric = %config.metric,
            ranking = %ranking,
            access_paths = %paths,
            "Ranker configured"
        );

        Ok(Ranker {
            metric: config.metric.clone(),
            ranking,
            access_paths: AccessPaths::parse(paths),
        })
    }

    /// Rank every selected document of the batch in place.
    ///
    /// Each selected document's match list is replaced with its ranked list;
    /// nothing else is touched. A document whose pool holds a match without
    /// the metric aborts the whole call with `MissingScore`. Documents ranked
    /// before it keep their new lists, the failing one keeps its old list.
    pub fn rank(&self, docs: &mut [Document], parameters: &Parameters) -> Result<(), RankerError> {
        let paths = self.access_paths_for(parameters);
        if paths.is_empty() {
            tracing::debug!(access_paths = %paths, "Access paths select no documents");
            return Ok(());
        }

        for &depth in paths.depths() {
            let selected = select_mut(docs, depth);
            tracing::debug!(
                access_paths = %paths,
                depth = depth,
                documents = selected.len(),
                "Ranking selected documents"
            );
            self.rank_selected(selected)?;
        }
        Ok(())
    }

    /// Compute the ranked match list of one document without modifying it.
    ///
    /// Steps:
    /// 1. Pool the document's own matches, then each chunk's matches in chunk order
    /// 2. Stable-sort the pool by parent key and split it into runs of equal key
    /// 3. Reduce each run to one representative carrying the parent key as its id
    /// 4. Sort the representatives by score in the policy's direction
    pub fn rank_document(&self, doc: &Document) -> Result<Vec<Match>, RankerError> {
        self.rank_pool(doc).map(|(_, ranked)| ranked)
    }

    /// `rank_document` plus the number of pooled candidates.
    fn rank_pool(&self, doc: &Document) -> Result<(usize, Vec<Match>), RankerError> {
        let metric = self.metric.as_str();

        // Step 1: every pooled match must carry the metric
        let mut pool = doc
            .matches
            .iter()
            .chain(doc.chunks.iter().flat_map(|chunk| chunk.matches.iter()))
            .map(|m| m.score(metric).map(|score| Scored { score, item: m }))
            .collect::<Result<Vec<_>, RankerError>>()?;

        let pool_size = pool.len();

        // Step 2: group by parent key
        pool.sort_by(|a, b| a.item.group_key().cmp(b.item.group_key()));

        // Step 3: one representative per group
        let mut ranked: Vec<(f64, Match)> = Vec::new();
        for group in pool.chunk_by_mut(|a, b| a.item.group_key() == b.item.group_key()) {
            let key = group[0].item.group_key().to_string();

            let (score, mut representative) = if self.ranking.is_mean() {
                let mean = group.iter().map(|s| s.score).sum::<f64>() / group.len() as f64;
                let mut representative = group[0].item.clone();
                representative.set_score(metric, mean, self.ranking.as_str());
                (mean, representative)
            } else {
                group.sort_by(|a, b| self.ranking.compare(a.score, b.score));
                (group[0].score, group[0].item.clone())
            };

            representative.id = key;
            ranked.push((score, representative));
        }

        // Step 4: final order
        ranked.sort_by(|a, b| self.ranking.compare(a.0, b.0));

        Ok((pool_size, ranked.into_iter().map(|(_, m)| m).collect()))
    }

    fn rank_in_place(&self, doc: &mut Document) -> Result<(), RankerError> {
        let (candidates, ranked) = self.rank_pool(doc)?;
        tracing::debug!(
            doc_id = %doc.id,
            candidates = candidates,
            ranked = ranked.len(),
            "Ranked document"
        );
        doc.matches = ranked;
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    fn rank_selected(&self, selected: Vec<&mut Document>) -> Result<(), RankerError> {
        for doc in selected {
            self.rank_in_place(doc)?;
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn rank_selected(&self, selected: Vec<&mut Document>) -> Result<(), RankerError> {
        selected
            .into_par_iter()
            .try_for_each(|doc| self.rank_in_place(doc))
    }

    /// Per-call `access_paths` parameter if it is a string, else the configured paths.
    fn access_paths_for(&self, parameters: &Parameters) -> Cow<'_, AccessPaths> {
        match parameters.get(ACCESS_PATHS_PARAM) {
            Some(serde_json::Value::String(expr)) => Cow::Owned(AccessPaths::parse(expr)),
            Some(other) => {
                tracing::warn!(
                    value = %other,
                    "access_paths parameter is not a string, using configured access paths"
                );
                Cow::Borrowed(&self.access_paths)
            }
            None => Cow::Borrowed(&self.access_paths),
        }
    }
}

impl Executor for Ranker {
    fn handles(&self, endpoint: &str) -> bool {
        endpoint == SEARCH_ENDPOINT
    }

    fn process(
        &self,
        _endpoint: &str,
        docs: &mut [Document],
        parameters: &Parameters,
    ) -> Result<(), RankerError> {
        self.rank(docs, parameters)
    }
}
