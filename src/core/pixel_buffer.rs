use crate::core::color::Color;

/// Read-back copy of the render target: row-major, origin at the top-left.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            data: vec![Color::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) is outside of a {} x {} buffer",
            x,
            y,
            self.width,
            self.height
        );
        let index = self.index(x, y);
        self.data[index] = color;
    }

    /// All pixels of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
