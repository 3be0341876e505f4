// Network strategy
//
// Builds a node/edge topology from records. Display mode is ignored.

use super::instruction::{
    NetworkEdge, NetworkInstruction, NetworkNode, PlaceholderInstruction, RenderInstruction,
};
use super::records;
use super::RenderContext;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub(crate) fn render(ctx: &RenderContext<'_>, data: Option<&[Value]>) -> RenderInstruction {
    let Some(records) = data else {
        return PlaceholderInstruction::no_data(ctx.descriptor);
    };

    let field = ctx.value_field();
    let mut nodes: Vec<NetworkNode> = Vec::new();
    let mut links: Vec<(String, Vec<String>)> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    // Synthesized ids must never shadow an id a record declares
    let explicit: HashSet<String> = records
        .iter()
        .filter_map(|r| records::text(r, &ctx.config.id_field))
        .collect();

    // Build nodes
    for (i, record) in records.iter().enumerate() {
        let id = match records::text(record, &ctx.config.id_field) {
            Some(id) => id,
            None => synthesize_id(i, &explicit, &index_of),
        };
        if index_of.contains_key(&id) {
            debug!(target: "widget_renderer", widget = %ctx.descriptor.id(), node = %id, "Skipping duplicate node id");
            continue;
        }

        let value = records::number(record, field);
        let band = value.and_then(|v| ctx.band_for(v));
        index_of.insert(id.clone(), nodes.len());
        links.push((id.clone(), records::id_list(record, &ctx.config.link_field)));
        nodes.push(NetworkNode {
            label: records::text(record, &ctx.config.label_field).unwrap_or_else(|| id.clone()),
            id,
            value,
            status: band.as_ref().map(|b| b.label.clone()),
            color: band
                .map(|b| b.color)
                .unwrap_or_else(|| ctx.config.accent_color.clone()),
        });
    }

    // Build edges from declared links; undirected, so (a, b) == (b, a)
    let mut edges = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let declared = links.iter().any(|(_, targets)| !targets.is_empty());
    for (from, targets) in &links {
        for to in targets {
            if to == from || !index_of.contains_key(to) {
                continue;
            }
            let key = if from < to {
                (from.clone(), to.clone())
            } else {
                (to.clone(), from.clone())
            };
            if seen.insert(key) {
                edges.push(NetworkEdge {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
    }

    // No declared links: chain nodes in record order
    if !declared {
        edges = nodes
            .windows(2)
            .map(|pair| NetworkEdge {
                from: pair[0].id.clone(),
                to: pair[1].id.clone(),
            })
            .collect();
    }

    RenderInstruction::Network(NetworkInstruction {
        widget_id: ctx.descriptor.id().to_string(),
        title: ctx.descriptor.title().to_string(),
        nodes,
        edges,
    })
}

fn synthesize_id(index: usize, explicit: &HashSet<String>, taken: &HashMap<String, usize>) -> String {
    let base = format!("node-{}", index);
    let mut id = base.clone();
    let mut n = 1;
    while explicit.contains(&id) || taken.contains_key(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    id
}
