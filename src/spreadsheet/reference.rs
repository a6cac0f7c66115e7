/// Converts a 0-based column index to spreadsheet column letters (0 → "A", 27 → "AB").
pub fn index_to_column(col: usize) -> String {
    let mut column = col + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + (column % 26) as u32).expect("Hardcode letters");
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}

/// Converts 0-based row and column indexes to a spreadsheet reference (0, 0 → "A1").
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_column(col), row + 1)
}
