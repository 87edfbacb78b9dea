use super::rows::Row;

/// Resize every cell in proportion to its weight while keeping the row
/// structure. Equal weights reproduce a layout whose rows already fill the
/// height with uniform tiles.
pub fn rescale_rows(rows: &mut [Row], container_height: f64) {
    let mut base_width: f64 = 0.0;
    let mut total_height_ratio = 0.0;
    for row in rows.iter() {
        let weight_sum: f64 = row.cells.iter().map(|c| c.weight).sum();
        if weight_sum > 0.0 {
            base_width = base_width.max(row.width / weight_sum);
        }
        total_height_ratio += row.cells.iter().map(|c| c.weight).fold(0.0, f64::max);
    }

    let base_height = if total_height_ratio > 0.0 {
        container_height / total_height_ratio
    } else {
        0.0
    };

    for row in rows.iter_mut() {
        for cell in &mut row.cells {
            cell.width = base_width * cell.weight;
            cell.height = base_height * cell.weight;
        }
        row.refresh();
    }
}
