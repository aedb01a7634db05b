/// Quadrant tour — one reading from each corner of the coordinate plane.
///
/// Run with: cargo run --example quadrant_tour
use resonance_engine::core::corpus::CorpusSet;
use resonance_engine::core::report::ReportGenerator;
use resonance_engine::schema::coordinate::Coordinate;

fn main() {
    let corpus = CorpusSet::builtin().expect("Failed to parse builtin corpus");
    let mut generator = ReportGenerator::new(corpus, 7).expect("Corpus failed validation");

    let stops = [
        Coordinate::new(-0.8, 0.8),
        Coordinate::new(0.8, 0.8),
        Coordinate::new(-0.8, -0.8),
        Coordinate::new(0.8, -0.8),
    ];

    for coords in stops {
        let report = generator
            .generate(coords)
            .expect("Validated corpus cannot produce an empty pool");

        println!(
            "({:+.1}, {:+.1}) — {}",
            coords.x,
            coords.y,
            coords.quadrant().key()
        );
        for entry in &report.composition {
            println!("  {:>3}%  {}", entry.percentage, entry.element);
        }
        println!("  \"{}\"\n", report.tasting_note);
    }
}
