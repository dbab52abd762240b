use serde::{Deserialize, Serialize};

use crate::core::{color::Color, error::SwatchError};

/// Determines whether a row blends between its colors or draws them as blocks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Gradient,
    Palette,
}

/// One horizontal band of the swatch. Colors are stored left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub colors: Vec<Color>,
    pub mode: RowMode,
}

impl Row {
    pub fn new(mode: RowMode) -> Row {
        Row {
            colors: Vec::new(),
            mode,
        }
    }
}

/**
 * Ordered collection of rows, stacked top to bottom in insertion order. Rows
 * and colors can only ever be appended: nothing here removes or reorders them.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwatchModel {
    rows: Vec<Row>,
}

impl SwatchModel {
    pub fn new() -> SwatchModel {
        SwatchModel::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Result<&Row, SwatchError> {
        let row_count = self.rows.len();
        self.rows
            .get(index)
            .ok_or(SwatchError::IndexError { index, row_count })
    }

    /// Appends an empty palette row, returning its index.
    pub fn add_palette(&mut self) -> usize {
        self.push_row(RowMode::Palette, Vec::new())
    }

    /// Appends an empty gradient row, returning its index.
    pub fn add_gradient(&mut self) -> usize {
        self.push_row(RowMode::Gradient, Vec::new())
    }

    pub fn add_palette_with(&mut self, colors: &[Color]) -> usize {
        self.push_row(RowMode::Palette, colors.to_vec())
    }

    pub fn add_gradient_with(&mut self, colors: &[Color]) -> usize {
        self.push_row(RowMode::Gradient, colors.to_vec())
    }

    pub fn add_color(&mut self, color: Color, row_index: usize) -> Result<(), SwatchError> {
        self.row_mut(row_index)?.colors.push(color);
        Ok(())
    }

    pub fn add_colors(&mut self, colors: &[Color], row_index: usize) -> Result<(), SwatchError> {
        self.row_mut(row_index)?.colors.extend_from_slice(colors);
        Ok(())
    }

    fn push_row(&mut self, mode: RowMode, colors: Vec<Color>) -> usize {
        self.rows.push(Row { colors, mode });
        self.rows.len() - 1
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut Row, SwatchError> {
        let row_count = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(SwatchError::IndexError { index, row_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_insertion_order() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);

        let mut model = SwatchModel::new();
        assert_eq!(model.add_gradient_with(&[red, blue]), 0);
        assert_eq!(model.add_palette(), 1);
        assert_eq!(model.add_gradient(), 2);

        assert_eq!(model.row_count(), 3);
        assert_eq!(model.rows()[0].mode, RowMode::Gradient);
        assert_eq!(model.rows()[0].colors, vec![red, blue]);
        assert_eq!(model.rows()[1].mode, RowMode::Palette);
        assert!(model.rows()[1].colors.is_empty());
        assert_eq!(model.rows()[2].mode, RowMode::Gradient);
    }

    #[test]
    fn test_add_colors_appends_to_the_end() {
        let mut model = SwatchModel::new();
        let row = model.add_palette_with(&[Color::BLACK]);
        model.add_color(Color::WHITE, row).unwrap();
        model
            .add_colors(&[Color::new(0.5, 0.5, 0.5), Color::BLACK], row)
            .unwrap();

        assert_eq!(
            model.row(row).unwrap().colors,
            vec![
                Color::BLACK,
                Color::WHITE,
                Color::new(0.5, 0.5, 0.5),
                Color::BLACK
            ]
        );
    }

    #[test]
    fn test_out_of_bounds_row_index() {
        let mut model = SwatchModel::new();
        model.add_gradient();
        model.add_palette();

        assert_eq!(
            model.add_color(Color::WHITE, 5),
            Err(SwatchError::IndexError {
                index: 5,
                row_count: 2
            })
        );
        assert_eq!(
            model.add_colors(&[Color::WHITE], 2),
            Err(SwatchError::IndexError {
                index: 2,
                row_count: 2
            })
        );
        // Nothing was modified by the failed calls
        assert!(model.rows().iter().all(|row| row.colors.is_empty()));
    }
}
