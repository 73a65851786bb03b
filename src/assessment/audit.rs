use super::Assessment;
use crate::types::catalog::{pool_spec, POOLS};
use crate::types::report::Finding;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub fn audit(assessment: &Assessment) -> Vec<Finding> {
    let mut findings: Vec<Finding> = assessment
        .warnings
        .iter()
        .map(|warning| {
            Finding::blocking(
                "assessment.load_failed",
                "Assessment source unavailable",
                format!("{warning}; an empty fallback was used."),
            )
        })
        .collect();

    let mapping = &assessment.mapping;
    if mapping.clusters.is_empty() {
        findings.push(Finding::blocking(
            "mapping.empty",
            "No career clusters configured",
            "Cluster ranking needs at least one cluster in the mapping.".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for cluster in &mapping.clusters {
        if !names.insert(cluster.name.as_str()) {
            findings.push(Finding::blocking(
                "mapping.duplicate_cluster",
                "Duplicate cluster name",
                format!("Cluster '{}' is defined more than once.", cluster.name),
            ));
        }
    }

    let produced = produced_facets(assessment);
    let mut weighted: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for cluster in &mapping.clusters {
        for (group, weights) in &cluster.weights {
            if pool_spec(group).is_none() {
                findings.push(Finding::warning(
                    "mapping.unknown_group",
                    "Weights reference an unknown pool",
                    format!(
                        "Cluster '{}' weighs pool '{group}', which no assessment section asks.",
                        cluster.name
                    ),
                ));
                continue;
            }
            for (facet, weight) in weights {
                weighted
                    .entry(group.as_str())
                    .or_default()
                    .insert(facet.as_str());
                let known = produced
                    .get(group.as_str())
                    .is_some_and(|facets| facets.contains(facet.as_str()));
                if !known {
                    findings.push(Finding::warning(
                        "mapping.dangling_facet",
                        "Weight on a facet no item produces",
                        format!(
                            "Cluster '{}' weighs {group}.{facet}, which always contributes 0.",
                            cluster.name
                        ),
                    ));
                }
                if *weight < 0.0 {
                    findings.push(Finding::warning(
                        "mapping.negative_weight",
                        "Negative cluster weight",
                        format!(
                            "Cluster '{}' weighs {group}.{facet} at {weight}; percent fit can drop below 0.",
                            cluster.name
                        ),
                    ));
                }
            }
        }
    }

    for spec in POOLS.iter() {
        let Some(facets) = produced.get(spec.key) else {
            findings.push(Finding::warning(
                "catalog.empty_pool",
                "Assessment pool has no items",
                format!("Pool '{}' ({}) has no items.", spec.key, spec.title),
            ));
            continue;
        };
        if !spec.ranked {
            continue;
        }
        for facet in facets {
            let used = weighted
                .get(spec.key)
                .is_some_and(|weighted_facets| weighted_facets.contains(facet));
            if !used {
                findings.push(Finding::warning(
                    "catalog.orphan_facet",
                    "Facet not used by any cluster",
                    format!(
                        "{}.{facet} is scored but no cluster weighs it.",
                        spec.key
                    ),
                ));
            }
        }
    }

    findings
}

fn produced_facets(assessment: &Assessment) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut produced: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for pool in assessment.catalog.pools() {
        for item in &pool.items {
            produced
                .entry(pool.name.as_str())
                .or_default()
                .insert(item.facet.as_str());
        }
    }
    produced
}
