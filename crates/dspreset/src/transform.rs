//! Offset planning, kept separate from any interactive front end.
//!
//! Planning is a pure function of (preset, selection, offsets); applying a
//! plan is [`Preset::apply`](crate::Preset::apply). Preview is simply a plan
//! that is never applied.

use crate::types::{ChangeRecord, ModifyStats, Offsets};
use crate::Preset;
use log::warn;
use std::collections::BTreeSet;

/// Compute the geometry changes for every control whose `type` attribute is
/// in `selected_types`.
///
/// Matching is on the literal attribute: a control without a `type`
/// attribute is never selected, even though the type index reports it under
/// `"unknown"`. A matched control with a non-numeric geometry attribute is
/// counted as skipped and excluded from the plan; it never aborts the pass.
pub fn plan_changes(
    preset: &Preset,
    selected_types: &BTreeSet<String>,
    offsets: Offsets,
) -> (Vec<ChangeRecord>, ModifyStats) {
    let mut changes = Vec::new();
    let mut stats = ModifyStats::default();

    for control in preset.controls() {
        let Some(control_type) = control.control_type.as_deref() else {
            continue;
        };
        if !selected_types.contains(control_type) {
            continue;
        }
        stats.found += 1;

        match control.rect() {
            Ok(old) => changes.push(ChangeRecord {
                position: control.position,
                ident: control.ident.clone(),
                control_type: control_type.to_owned(),
                old,
                new: old.offset(offsets),
            }),
            Err(err) => {
                warn!("invalid geometry on control '{}': {}", control.ident, err);
                stats.skipped += 1;
            }
        }
    }

    (changes, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn selection(types: &[&str]) -> BTreeSet<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    const PRESET: &str = r#"<DecentSampler>
  <ui>
    <control type="knob" id="attack" x="10" y="20" width="30" height="30"/>
    <control type="button" id="hold" x="100" y="20" width="40" height="20"/>
    <control type="knob" id="broken" x="10" y="20" width="wide" height="30"/>
    <control type="label" label="Env"/>
  </ui>
</DecentSampler>"#;

    #[test]
    fn offsets_apply_to_selected_types_only() {
        let preset = Preset::parse(PRESET).unwrap();
        let (changes, stats) = plan_changes(
            &preset,
            &selection(&["knob"]),
            Offsets::new(5.0, -5.0, 0.0, 10.0),
        );

        assert_eq!(stats, ModifyStats { found: 2, modified: 0, skipped: 1 });
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].ident, "attack");
        assert_eq!(
            changes[0].new,
            Rect { x: 15.0, y: 15.0, width: 30.0, height: 40.0 }
        );
        assert!(changes.iter().all(|c| c.control_type == "knob"));
    }

    #[test]
    fn empty_selection_finds_nothing() {
        let preset = Preset::parse(PRESET).unwrap();
        let (changes, stats) = plan_changes(&preset, &selection(&[]), Offsets::new(1.0, 1.0, 1.0, 1.0));
        assert!(changes.is_empty());
        assert_eq!(stats, ModifyStats::default());
    }

    #[test]
    fn missing_geometry_defaults_to_zero() {
        let preset = Preset::parse(PRESET).unwrap();
        let (changes, stats) =
            plan_changes(&preset, &selection(&["label"]), Offsets::new(3.0, 0.0, 0.0, 0.0));

        assert_eq!(stats.found, 1);
        assert_eq!(changes[0].old, Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 });
        assert_eq!(changes[0].new.x, 3.0);
    }

    #[test]
    fn untyped_controls_never_match_the_unknown_placeholder() {
        let preset = Preset::parse(
            r#"<DecentSampler><ui><control x="1" y="1"/></ui></DecentSampler>"#,
        )
        .unwrap();
        let (changes, stats) =
            plan_changes(&preset, &selection(&["unknown"]), Offsets::new(1.0, 0.0, 0.0, 0.0));
        assert!(changes.is_empty());
        assert_eq!(stats.found, 0);
    }

    #[test]
    fn planning_does_not_mutate_the_preset() {
        let preset = Preset::parse(PRESET).unwrap();
        let before = preset.xml().to_owned();
        let offsets = Offsets::new(5.0, -5.0, 0.0, 10.0);

        let (first, _) = plan_changes(&preset, &selection(&["knob"]), offsets);
        let (second, _) = plan_changes(&preset, &selection(&["knob"]), offsets);

        assert_eq!(preset.xml(), before);
        assert_eq!(first[0].new, second[0].new);
    }
}
