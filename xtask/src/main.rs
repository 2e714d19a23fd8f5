use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, WrapErr};
use planforge_draw::render::envelope::Envelope;
use planforge_draw::{
    DrawingError, FloorPlan, Layout, Plot, RenderOptions, RoadSide, RoomRect, SectionOptions, TitleBlock,
    render_floor_plan, render_section,
};
use rayon::prelude::*;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  sample-drawings [out_dir]    Render the bundled sample layouts to SVG");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "sample-drawings" => {
            let out = args
                .get(2)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| Utf8PathBuf::from("target/sample-drawings"));
            sample_drawings(&out)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// One SVG to produce
struct Job<'a> {
    file: String,
    plot: &'a Plot,
    floor: &'a FloorPlan,
    options: RenderOptions,
}

fn sample_drawings(out: &Utf8Path) -> miette::Result<()> {
    std::fs::create_dir_all(out)
        .into_diagnostic()
        .wrap_err_with(|| format!("creating {out}"))?;

    let samples = samples();
    let mut jobs = Vec::new();
    for (plot, layout) in &samples {
        let title = TitleBlock {
            project: "Sample drawings".to_string(),
            layout: layout.name.clone(),
            config: Some(format!("{} floors", layout.floors.len())),
            date: None,
        };
        for floor in &layout.floors {
            jobs.push(Job {
                file: format!("{}-floor{}.svg", layout.id, floor.level),
                plot,
                floor,
                options: RenderOptions {
                    show_room_dimensions: true,
                    show_structural_grid: true,
                    infer_columns: true,
                    ..RenderOptions::default()
                }
                .with_title(title.clone()),
            });
        }
    }

    let plans = jobs
        .par_iter()
        .map(|job| -> Result<(String, String), DrawingError> {
            let scene = render_floor_plan(job.plot, job.floor, &job.options)?;
            Ok((job.file.clone(), scene.to_svg()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sections = samples
        .par_iter()
        .map(|(_, layout)| -> Result<(String, String), DrawingError> {
            let width = layout
                .floors
                .first()
                .map(|f| Envelope::from_rooms(&f.rooms).width())
                .unwrap_or_default();
            let scene = render_section(width, &SectionOptions::default())?;
            Ok((format!("{}-section.svg", layout.id), scene.to_svg()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (file, svg) in plans.iter().chain(&sections) {
        let path = out.join(file);
        std::fs::write(&path, svg)
            .into_diagnostic()
            .wrap_err_with(|| format!("writing {path}"))?;
        tracing::info!(%path, bytes = svg.len(), "wrote drawing");
    }

    eprintln!("Wrote {} drawings to {}", plans.len() + sections.len(), out);
    Ok(())
}

fn room(id: &str, name: &str, kind: &str, x: f64, y: f64, w: f64, d: f64) -> RoomRect {
    RoomRect::new(id, name, kind, x, y, w, d)
}

fn samples() -> Vec<(Plot, Layout)> {
    let duplex = Layout {
        id: "compact-duplex".to_string(),
        name: "Compact Duplex".to_string(),
        floors: vec![
            FloorPlan::new(
                0,
                vec![
                    room("g1", "Living", "living", 0.0, 0.0, 4.5, 4.5),
                    room("g2", "Kitchen", "kitchen", 4.5, 0.0, 3.0, 3.0),
                    room("g3", "Utility", "utility", 7.5, 0.0, 1.5, 3.0),
                    room("g4", "Dining", "dining", 4.5, 3.0, 4.5, 1.5),
                    room("g5", "Bedroom", "bedroom", 0.0, 4.5, 4.5, 4.0),
                    room("g6", "Toilet", "toilet", 4.5, 4.5, 1.8, 1.8),
                    room("g7", "Stairs", "staircase", 6.3, 4.5, 2.7, 4.0),
                ],
                vec![],
            ),
            FloorPlan::new(
                1,
                vec![
                    room("f1", "Master Bedroom", "master_bedroom", 0.0, 0.0, 4.5, 4.5),
                    room("f2", "Bedroom", "bedroom", 4.5, 0.0, 4.5, 4.5),
                    room("f3", "Toilet", "toilet", 0.0, 4.5, 2.0, 2.0),
                    room("f4", "Study", "study", 2.0, 4.5, 2.5, 4.0),
                    room("f5", "Balcony", "balcony", 4.5, 4.5, 1.8, 2.0),
                    room("f6", "Stairs", "staircase", 6.3, 4.5, 2.7, 4.0),
                ],
                vec![],
            ),
        ],
    };

    let corner = Layout {
        id: "corner-plot".to_string(),
        name: "Corner Plot".to_string(),
        floors: vec![FloorPlan::new(
            0,
            vec![
                room("g1", "Parking", "parking", 0.0, 0.0, 5.0, 5.5),
                room("g2", "Living", "living", 5.0, 0.0, 5.0, 5.5),
                room("g3", "Kitchen", "kitchen", 0.0, 5.5, 3.5, 3.5),
                room("g4", "Pooja", "pooja", 3.5, 5.5, 1.5, 1.5),
                room("g5", "Bedroom", "bedroom", 5.0, 5.5, 5.0, 4.5),
                room("g6", "Toilet", "toilet", 3.5, 7.0, 1.5, 2.0),
            ],
            vec![],
        )],
    };

    vec![
        (Plot::rectangle(9.0, 12.0, RoadSide::South).with_road_width(9.0), duplex),
        (Plot::trapezoid(10.5, 12.0, 18.0, RoadSide::East).with_road_width(12.0), corner),
    ]
}
