//! Greedy modularity community detection
//!
//! Agglomerative merging in the style of Clauset–Newman–Moore: every node
//! starts alone and the connected pair of communities with the largest
//! modularity gain is merged until no merge gains anything.
//!
//! Gains are compared on the integer numerator `2m·l_ij − d_i·d_j` (the
//! shared denominator `2m²` is dropped) so ties are exact and broken by
//! combined size, then by the smallest subject in the merged community.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::types::Graph;

#[derive(Debug, Clone)]
struct Community {
    members: Vec<usize>,
    degree: i64,
    min_subject: String,
}

/// Partition the graph's nodes into communities.
///
/// Members of each community are sorted by subject; communities are ordered
/// by size descending, then by their first subject.
pub fn greedy_modularity_communities(graph: &Graph) -> Vec<Vec<String>> {
    let nodes = graph.nodes();
    let adjacency = graph.adjacency();
    let m = graph.edge_count() as i64;

    let mut communities: Vec<Option<Community>> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            Some(Community {
                members: vec![i],
                degree: adjacency[i].len() as i64,
                min_subject: node.subject.clone(),
            })
        })
        .collect();

    // edge counts between communities, keyed (low, high)
    let mut links: BTreeMap<(usize, usize), i64> = BTreeMap::new();
    for (i, nbrs) in adjacency.iter().enumerate() {
        for &j in nbrs.iter().filter(|&&j| j > i) {
            *links.entry((i, j)).or_insert(0) += 1;
        }
    }

    let mut merges = 0usize;
    while let Some((i, j)) = best_merge(&communities, &links, m) {
        merge(&mut communities, &mut links, i, j);
        merges += 1;
    }

    let mut result: Vec<Vec<String>> = communities
        .into_iter()
        .flatten()
        .map(|c| {
            let mut subjects: Vec<String> = c
                .members
                .into_iter()
                .map(|i| nodes[i].subject.clone())
                .collect();
            subjects.sort();
            subjects
        })
        .collect();
    result.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));

    tracing::debug!(
        nodes = nodes.len(),
        merges,
        communities = result.len(),
        "greedy modularity finished"
    );
    result
}

/// The connected pair with the strictly positive, best tie-broken gain
fn best_merge(
    communities: &[Option<Community>],
    links: &BTreeMap<(usize, usize), i64>,
    m: i64,
) -> Option<(usize, usize)> {
    links
        .iter()
        .filter_map(|(&(i, j), &l_ij)| {
            let (ci, cj) = (communities[i].as_ref()?, communities[j].as_ref()?);
            let gain = 2 * m * l_ij - ci.degree * cj.degree;
            if gain <= 0 {
                return None;
            }
            let size = ci.members.len() + cj.members.len();
            let (lo, hi) = if ci.min_subject <= cj.min_subject {
                (&ci.min_subject, &cj.min_subject)
            } else {
                (&cj.min_subject, &ci.min_subject)
            };
            Some(((Reverse(gain), size, lo.clone(), hi.clone()), (i, j)))
        })
        .min_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, pair)| pair)
}

/// Fold community `j` into `i` and re-key every link that touched `j`
fn merge(
    communities: &mut [Option<Community>],
    links: &mut BTreeMap<(usize, usize), i64>,
    i: usize,
    j: usize,
) {
    let Some(absorbed) = communities[j].take() else {
        return;
    };
    if let Some(target) = communities[i].as_mut() {
        target.members.extend(absorbed.members);
        target.degree += absorbed.degree;
        if absorbed.min_subject < target.min_subject {
            target.min_subject = absorbed.min_subject;
        }
    }

    let touching: Vec<(usize, usize)> = links
        .keys()
        .filter(|&&(a, b)| a == j || b == j)
        .copied()
        .collect();
    for key in touching {
        let Some(count) = links.remove(&key) else {
            continue;
        };
        let other = if key.0 == j { key.1 } else { key.0 };
        if other == i {
            continue;
        }
        let rekeyed = if other < i { (other, i) } else { (i, other) };
        *links.entry(rekeyed).or_insert(0) += count;
    }
}

/// Newman modularity of a partition given as subject lists
pub fn modularity(graph: &Graph, communities: &[Vec<String>]) -> f64 {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let mut membership: BTreeMap<&str, usize> = BTreeMap::new();
    for (c, members) in communities.iter().enumerate() {
        for s in members {
            membership.insert(s.as_str(), c);
        }
    }

    let mut internal = vec![0.0_f64; communities.len()];
    let mut degree = vec![0.0_f64; communities.len()];
    for edge in graph.edges() {
        let (Some(&cs), Some(&ct)) = (
            membership.get(edge.source.as_str()),
            membership.get(edge.target.as_str()),
        ) else {
            continue;
        };
        degree[cs] += 1.0;
        degree[ct] += 1.0;
        if cs == ct {
            internal[cs] += 1.0;
        }
    }

    internal
        .iter()
        .zip(&degree)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}
