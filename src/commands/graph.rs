//! Edge and traversal commands.

use super::{OutputFormat, print_entries_table, print_json, truncate};
use etymon::{ChainOptions, Edge, Entry, LexiconBackend, LexiconService, Neighbor, NodeId};
use std::error::Error;

/// Shows the edges (or neighbors) of a node.
pub fn cmd_edges<B: LexiconBackend>(
    service: &LexiconService<B>,
    node_id: &str,
    incoming: bool,
    neighbors: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let id = NodeId::new(node_id);

    if neighbors {
        let found = if incoming {
            service.get_incoming_neighbors(&id)?
        } else {
            service.get_outgoing_neighbors(&id)?
        };
        return match format {
            OutputFormat::Json => print_json(&found),
            OutputFormat::Table => {
                print_neighbors_table(&found);
                Ok(())
            },
        };
    }

    let edges = if incoming {
        service.get_incoming_edges(&id)?
    } else {
        service.get_outgoing_edges(&id)?
    };
    match format {
        OutputFormat::Json => print_json(&edges)?,
        OutputFormat::Table => print_edges_table(&id, &edges, incoming),
    }

    Ok(())
}

/// Shows everything descending from a word.
pub fn cmd_descendants<B: LexiconBackend>(
    service: &LexiconService<B>,
    word: &str,
    max_depth: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let options = chain_options(max_depth);
    let chain = service.get_descendant_chain_for_word(word, &options)?;
    print_chain(word, &chain, format)
}

/// Shows the ancestry of a word, newest first.
pub fn cmd_chain<B: LexiconBackend>(
    service: &LexiconService<B>,
    word: &str,
    max_depth: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let options = chain_options(max_depth);
    let chain = service.get_etymology_chain_for_word(word, &options)?;

    if format == OutputFormat::Table && !chain.is_empty() {
        let lineage: Vec<String> = chain
            .iter()
            .map(|e| format!("{} ({})", e.word, e.lang_code))
            .collect();
        println!("{}", lineage.join(" <- "));
        println!();
    }

    print_chain(word, &chain, format)
}

/// (edge id, relation, far endpoint) per edge; a self-loop shows `id` itself.
fn edge_rows<'a>(id: &NodeId, edges: &'a [Edge]) -> Vec<(i64, &'a str, String)> {
    edges
        .iter()
        .map(|edge| {
            let far = edge.other_end(id).map_or_else(|| id.to_string(), ToString::to_string);
            (edge.id, edge.relation_type.as_str(), far)
        })
        .collect()
}

fn chain_options(max_depth: Option<usize>) -> ChainOptions {
    max_depth.map_or_else(ChainOptions::new, |depth| ChainOptions::new().with_max_depth(depth))
}

fn print_chain(word: &str, chain: &[Entry], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => print_json(chain)?,
        OutputFormat::Table if chain.is_empty() => {
            println!("No canonical entry found for '{word}'.");
        },
        OutputFormat::Table => print_entries_table(chain),
    }
    Ok(())
}

/// Prints edges as a table, showing the endpoint opposite `id`.
fn print_edges_table(id: &NodeId, edges: &[Edge], incoming: bool) {
    let arrow = if incoming { "<-" } else { "->" };
    println!("{:>8}  {:<12}  {:<2}  {:<40}", "EDGE", "RELATION", "", "NODE");
    println!("{}", "-".repeat(68));
    for row in edge_rows(id, edges) {
        println!(
            "{:>8}  {:<12}  {arrow}  {:<40}",
            row.0,
            row.1,
            truncate(&row.2, 40)
        );
    }
    println!();
    println!("{} edges at {id}", edges.len());
}

/// Prints neighbors as a table.
fn print_neighbors_table(neighbors: &[Neighbor]) {
    println!(
        "{:<12}  {:<8}  {:<20}  {:<10}  {:<40}",
        "RELATION", "LANG", "WORD", "POS", "NODE ID"
    );
    println!("{}", "-".repeat(98));
    for neighbor in neighbors {
        println!(
            "{:<12}  {:<8}  {:<20}  {:<10}  {:<40}",
            neighbor.relation_type.as_str(),
            neighbor.lang_code,
            truncate(&neighbor.word, 20),
            neighbor.pos.as_deref().unwrap_or("-"),
            neighbor.node_id
        );
    }
    println!();
    println!("{} neighbors", neighbors.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    use etymon::RelationType;

    #[test]
    fn test_edge_rows_show_far_endpoint() {
        let id = NodeId::new("la:historia:noun:0");
        let edges = vec![
            Edge {
                id: 1,
                src_id: id.clone(),
                dst_id: NodeId::new("en:history:noun:0"),
                relation_type: RelationType::Descendant,
            },
            Edge {
                id: 2,
                src_id: NodeId::new("grc:ἱστορία:noun:0"),
                dst_id: id.clone(),
                relation_type: RelationType::Descendant,
            },
        ];

        let rows = edge_rows(&id, &edges);
        assert_eq!(rows[0], (1, "descendant", "en:history:noun:0".to_string()));
        assert_eq!(rows[1], (2, "descendant", "grc:ἱστορία:noun:0".to_string()));
    }

    #[test]
    fn test_chain_options_default_depth() {
        assert_eq!(chain_options(None), ChainOptions::new());
        assert_eq!(chain_options(Some(3)).max_depth, Some(3));
    }
}
