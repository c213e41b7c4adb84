//! Text riser schematic.
//!
//! Floors are drawn top-down, ending at the head-end, one line per floor:
//!
//! ```text
//! F3 |- RG-6 20.0m > DER-2 > DIS-4 > AMP-10 = 78.00 dBuV [PASS] outlet 68.00
//! ```

use std::fmt::Write as _;

use riser_calc::FloorResult;
use riser_common::Category;

use crate::report::SimulationReport;

const CHAIN: [Category; 4] = [
    Category::Cable,
    Category::Splitter,
    Category::Distributor,
    Category::Amplifier,
];

pub fn render_schematic(report: &SimulationReport) -> String {
    let b = &report.building;
    let mut out = String::new();
    let width = report.floors.len().to_string().len() + 1;

    let _ = writeln!(
        out,
        "{} ({} floors, head-end {:.2} dBuV, signal {}, strategy {})",
        b.name, b.floors, b.head_end_level, b.signal_type, report.strategy
    );

    for floor in report.floors.iter().rev() {
        let _ = writeln!(
            out,
            "{:>width$} |- {}",
            format!("F{}", floor.floor),
            floor_line(floor, report.cable_length_m),
            width = width
        );
    }
    let _ = writeln!(out, "{:>width$} |", "HE", width = width);
    let _ = writeln!(
        out,
        "total cost {:.2}, levels {:.2}..{:.2} dBuV",
        report.summary.total_cost, report.summary.min_level, report.summary.max_level
    );
    out
}

/// Per-floor breakdown of every component's contribution.
pub fn render_trace(report: &SimulationReport) -> String {
    let b = &report.building;
    let mut out = String::new();
    for floor in &report.floors {
        let is_last = floor.floor == b.floors;
        let (level, steps) =
            floor
                .chosen
                .trace(floor.input_level, report.cable_length_m, is_last);
        let _ = writeln!(out, "floor {} in {:.2} dBuV", floor.floor, floor.input_level);
        for step in steps {
            let _ = writeln!(
                out,
                "  {:<11} {:<20} {:>+8.2} -> {:.2}",
                step.category.to_string(),
                step.model,
                step.delta,
                step.level_after
            );
        }
        let _ = writeln!(out, "  out {:.2} dBuV", level);
    }
    out
}

fn floor_line(floor: &FloorResult, cable_length_m: f64) -> String {
    let mut parts = Vec::new();
    for cat in CHAIN {
        if let Some(model) = floor.chosen.model(cat) {
            if cat == Category::Cable {
                parts.push(format!("{} {:.1}m", model, cable_length_m));
            } else {
                parts.push(model.to_string());
            }
        }
    }
    let chain = if parts.is_empty() {
        String::from("(direct)")
    } else {
        parts.join(" > ")
    };
    let verdict = match floor.pass {
        Some(true) => "PASS",
        Some(false) => "FAIL",
        None => "----",
    };
    let mut line = format!("{} = {:.2} dBuV [{}]", chain, floor.output_level, verdict);
    if let Some(outlet) = floor.outlet_level {
        let _ = write!(line, " outlet {:.2}", outlet);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Summary;
    use chrono::Utc;
    use riser_calc::Selection;
    use riser_common::{BuildingConfig, Cable, Tap};

    fn floor(n: u32, level: f64, pass: Option<bool>) -> FloorResult {
        FloorResult {
            floor: n,
            input_level: level + 4.0,
            chosen: Selection {
                cable: Some(Cable {
                    id: "c".into(),
                    model: "RG-6".into(),
                    cost: 1.0,
                    max_length_m: 100.0,
                    attenuation_per_100m: Some(20.0),
                }),
                tap: Some(Tap {
                    id: "t".into(),
                    model: "T-10".into(),
                    cost: 1.0,
                    attenuation: 10.0,
                    decoupling: 0.0,
                }),
                ..Selection::default()
            },
            output_level: level,
            outlet_level: Some(level - 10.0),
            snr: level,
            cost: 2.0,
            pass,
        }
    }

    #[test]
    fn floors_render_top_down() {
        let floors = vec![floor(1, 86.0, Some(true)), floor(2, 82.0, Some(false)), floor(3, 78.0, None)];
        let report = SimulationReport {
            id: "sim_x".into(),
            building: BuildingConfig {
                name: "Tower".into(),
                floors: 3,
                ..BuildingConfig::default()
            },
            strategy: "cheapest".into(),
            cable_length_m: 20.0,
            created_at: Utc::now(),
            summary: Summary::from_floors(&floors),
            floors,
        };
        let text = render_schematic(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Tower (3 floors"));
        assert!(lines[1].contains("F3 |- RG-6 20.0m = 78.00 dBuV [----]"), "{text}");
        assert!(lines[2].contains("[FAIL]"));
        assert!(lines[3].contains("F1") && lines[3].contains("[PASS] outlet 76.00"));
        assert!(lines[4].contains("HE |"));
        assert!(lines[5].starts_with("total cost 6.00"));
    }

    #[test]
    fn trace_lists_steps_per_floor() {
        let floors = vec![floor(1, 86.0, Some(true)), floor(2, 82.0, Some(true))];
        let report = SimulationReport {
            id: "sim_y".into(),
            building: BuildingConfig {
                floors: 2,
                ..BuildingConfig::default()
            },
            strategy: "cheapest".into(),
            cable_length_m: 20.0,
            created_at: Utc::now(),
            summary: Summary::from_floors(&floors),
            floors,
        };
        let text = render_trace(&report);
        assert!(text.contains("floor 1 in 90.00 dBuV"), "{text}");
        assert!(text.contains("-4.00 -> 86.00"), "{text}");
        assert!(text.contains("floor 2 in 86.00 dBuV"), "{text}");
        assert!(text.contains("out 82.00 dBuV"), "{text}");
    }
}
