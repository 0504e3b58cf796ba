//! Measures a small exhibition, composes its floor plan, and prints an
//! ASCII sketch of the entrance hall.

use std::time::Instant;

use museum_mvp::{
    Composer, Result, SectionSpec, SketchRenderer, StandardFootprint, measure_tree,
};

fn main() -> Result<()> {
    let document = SectionSpec::section("Kangaroo")
        .with_text(
            "Kangaroos are marsupials indigenous to Australia and New Guinea, \
             known for their powerful hind legs and large feet.",
        )
        .with_picture(1200, 800)
        .with_child(
            SectionSpec::section("Taxonomy")
                .with_text("The genus Macropus was split into several genera in 2019.")
                .with_picture(640, 480),
        )
        .with_child(
            SectionSpec::section("Habitat")
                .with_text("Most species favor open grassland and woodland.")
                .with_child(SectionSpec::section("Distribution").with_picture(1024, 512)),
        );

    let content = measure_tree(&StandardFootprint::default(), &document);

    let composer = Composer::with_default();
    let started = Instant::now();
    let (plan, metrics) = composer.compose_measured(&content);
    let snapshot = metrics.snapshot(started.elapsed());

    let mut stdout = std::io::stdout();
    SketchRenderer::with_default().sketch(&plan, &mut stdout)?;

    println!();
    println!(
        "{}: {} rooms, {} exhibits, {} wall segments, entrance hall {:.1} units wide",
        plan.name, snapshot.rooms, snapshot.exhibits_placed, snapshot.wall_segments, plan.width
    );
    Ok(())
}
