//! Air terminal units.

use hf_components::{AirTerminal, Equipment, TerminalKind};
use hf_core::{EquipId, UnitSystem};
use hf_project::Record;

use crate::context::{Context, PendingBinding};
use crate::defaults::{default_fan, default_heating_coil};
use crate::translators::{coil, fan};

/// Translate a `TrmlUnit` and queue its zone attachment.
///
/// The reheat coil and fan are contained equipment: they live in the model
/// but are not threaded into the air path. A missing or unusable one is
/// replaced by a default of the same role.
pub fn translate_terminal(ctx: &mut Context<'_>, rec: &Record) -> EquipId {
    let name = rec.label().to_string();
    let kind: TerminalKind = ctx.discriminator(rec, "Type");
    let mut terminal = AirTerminal::new(name.clone(), kind);
    terminal.max_primary_flow = ctx.sized(rec, "PriAirFlowMax", UnitSystem::air_flow);
    terminal.min_flow_fraction = ctx.fraction(rec, "PriAirFlowMinFrac");

    if kind.has_reheat() {
        let coil = rec
            .get_child("CoilHtg")
            .and_then(|c| coil::translate_heating_coil(ctx, c));
        terminal.reheat_coil = Some(coil.unwrap_or_else(|| default_heating_coil(ctx, &name)));
    }
    if kind.has_fan() {
        let fan = rec.get_child("Fan").map(|f| fan::translate_fan(ctx, f));
        terminal.fan = Some(fan.unwrap_or_else(|| default_fan(ctx, &name)));
    }

    let id = ctx.model.add_equipment(Equipment::AirTerminal(terminal));
    ctx.pending.push(PendingBinding {
        zone_name: rec.get_string("ZnServedRef").map(str::to_string),
        equipment: id,
        aliases: vec![name],
        induced_air_zone: rec
            .get_string("InducedAirZnRef")
            .filter(|_| kind.has_fan())
            .map(str::to_string),
    });
    id
}
