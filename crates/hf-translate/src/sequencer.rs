//! Segment sequencing.
//!
//! An air segment lists its fan and coils in declaration order, but the fan
//! sits physically first (blow-through) or last (draw-through) whatever its
//! position in the list. Sequencing is two passes: find the fan and fix the
//! physical order, then translate from the far end and thread each
//! component's outlet to the node its downstream neighbour drew from.

use hf_components::{Duct, Equipment, FanPosition};
use hf_core::{EquipId, NodeId};
use hf_graph::{GraphResult, Side};
use hf_project::Record;

use crate::context::Context;
use crate::model::Model;
use crate::translators::{coil, fan};

/// Components threaded between a segment's start and end nodes, in flow
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentChain {
    pub components: Vec<EquipId>,
    pub fan: Option<EquipId>,
}

/// Translate the fan and coils of `segment` and thread them from `start`
/// to `end`.
///
/// A second fan is an Error and is skipped. Components that fail to
/// translate are left out and the chain closes over the gap; a segment with
/// nothing left is bridged by a duct.
pub fn sequence(ctx: &mut Context<'_>, segment: &Record, start: NodeId, end: NodeId) -> SegmentChain {
    let owner = segment.label();

    let mut fan_rec: Option<&Record> = None;
    let mut physical: Vec<&Record> = Vec::new();
    for child in &segment.children {
        match child.tag.as_str() {
            "Fan" if fan_rec.is_some() => ctx.diags.error(
                owner,
                format!("second fan '{}' in segment; skipped", child.label()),
            ),
            "Fan" => fan_rec = Some(child),
            "CoilClg" | "CoilHtg" => physical.push(child),
            other => ctx
                .diags
                .warn(owner, format!("ignoring unsupported '{other}' record in segment")),
        }
    }
    if let Some(rec) = fan_rec {
        match fan::declared_position(rec) {
            FanPosition::BlowThrough => physical.insert(0, rec),
            FanPosition::DrawThrough => physical.push(rec),
        }
    }

    let mut chain = SegmentChain::default();
    let mut translated: Vec<EquipId> = Vec::with_capacity(physical.len());
    for rec in physical.iter().rev() {
        let id = match rec.tag.as_str() {
            "Fan" => {
                let id = fan::translate_fan(ctx, rec);
                chain.fan = Some(id);
                Some(id)
            }
            "CoilClg" => coil::translate_cooling_coil(ctx, rec),
            _ => coil::translate_heating_coil(ctx, rec),
        };
        translated.extend(id);
    }
    translated.reverse();

    if translated.is_empty() {
        let duct = ctx
            .model
            .add_equipment(Equipment::Duct(Duct::new(format!("{owner} Duct"))));
        translated.push(duct);
    }
    if let Err(e) = thread(&mut ctx.model, &translated, start, end) {
        ctx.diags.error(owner, format!("cannot thread segment: {e}"));
    }
    chain.components = translated;
    chain
}

/// Connect `components` (flow order) from `start` to `end`, working back
/// from `end`.
fn thread(model: &mut Model, components: &[EquipId], start: NodeId, end: NodeId) -> GraphResult<()> {
    let mut drop = end;
    for (i, &comp) in components.iter().enumerate().rev() {
        let inlet = if i == 0 {
            start
        } else {
            let name = format!("{} Inlet Node", model.equipment_name(comp));
            model.graph.add_node(name)
        };
        model.graph.connect_straight(comp, Side::Primary, inlet, drop)?;
        drop = inlet;
    }
    Ok(())
}
