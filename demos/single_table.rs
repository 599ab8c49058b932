use multable::grid::materialize;
use multable::output::{record_for_grid, render_text};
use multable::resolver::{resolve, RangeInput, DEFAULT_DOMAIN, DEFAULT_MAX_CELLS};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let range = resolve(
        RangeInput::new(12, 1, 1, 12),
        DEFAULT_DOMAIN,
        DEFAULT_MAX_CELLS,
    )?;
    let grid = materialize(&range);

    println!("Table: {}", range.title());
    println!("Cells: {}", grid.len());
    print!(
        "{}",
        String::from_utf8_lossy(&render_text(&[record_for_grid(&range.title(), &grid)]))
    );

    Ok(())
}
