use grasp_checker::config::load_config;
use grasp_checker::render::render_target_size;
use grasp_checker::types::RobotPose;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct CandidateReport {
    x: f64,
    y: f64,
    d: f64,
    inside_container: bool,
    stroke_admissible: bool,
    admissible: bool,
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "check_demo".to_string());
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = load_config(Path::new(&config_path))?;

    let box_data = config.box_data();
    let gripper = config.gripper();
    let rect = render_target_size(&box_data, config.projection.pixel_size, config.canvas_offset);
    println!(
        "Canvas for this container: {}x{} (height x width) at {} px/m",
        rect[0], rect[1], config.projection.pixel_size
    );

    let reports: Vec<CandidateReport> = config
        .poses()
        .iter()
        .map(|pose| geometry_report(pose, &box_data, &gripper))
        .collect();

    println!("\nGeometry stages ({} candidates):", reports.len());
    for (idx, r) in reports.iter().enumerate() {
        println!(
            "  #{idx}: ({:+.3}, {:+.3}) d={:.3} inside={} stroke={} -> {}",
            r.x,
            r.y,
            r.d,
            r.inside_container,
            r.stroke_admissible,
            if r.admissible { "candidate" } else { "rejected" }
        );
    }
    println!("\nThe collision stage needs a rasterizer backend; see the crate docs.");

    if let Some(path) = &config.output.json_out {
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn geometry_report(
    pose: &RobotPose,
    box_data: &grasp_checker::BoxData,
    gripper: &grasp_checker::Gripper,
) -> CandidateReport {
    let inside_container = box_data.is_pose_inside(pose);
    let stroke_admissible = gripper.admits(pose.d);
    CandidateReport {
        x: pose.pose.translation.vector.x,
        y: pose.pose.translation.vector.y,
        d: pose.d,
        inside_container,
        stroke_admissible,
        admissible: inside_container && stroke_admissible,
    }
}
