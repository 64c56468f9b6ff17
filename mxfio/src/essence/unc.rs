//! Uncompressed picture: no syntax to parse, frame sizes follow from
//! the sampling geometry.

use crate::error::MxfError;
use crate::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct UncPictureGeometry {
    pub width: u32,
    pub height: u32,
    pub component_depth: u32,
    pub horizontal_subsampling: u32,
}

impl UncPictureGeometry {
    /// UYVY-style 4:2:2, 8 or 10 bit.
    pub fn uyvy(width: u32, height: u32, component_depth: u32) -> UncPictureGeometry {
        UncPictureGeometry {
            width,
            height,
            component_depth,
            horizontal_subsampling: 2,
        }
    }

    /// Bytes per stored frame.
    pub fn frame_size(&self) -> Result<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(MxfError::LogicError("uncompressed geometry incomplete"));
        }
        let samples_per_pixel = 1 + 2 / self.horizontal_subsampling.max(1);
        let size = match self.component_depth {
            8 => self.width as usize * samples_per_pixel as usize,
            10 => {
                // 10-bit packed: 6 samples in 16 bytes for 4:2:2
                (self.width as usize * samples_per_pixel as usize * 10).div_ceil(8)
            }
            _ => return Err(MxfError::LogicError("unsupported component depth")),
        };
        Ok(size * self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sd_8bit_uyvy() {
        let geometry = UncPictureGeometry::uyvy(720, 576, 8);
        assert_eq!(geometry.frame_size().unwrap(), 720 * 2 * 576);
    }

    #[test]
    fn hd_10bit() {
        let geometry = UncPictureGeometry::uyvy(1920, 1080, 10);
        assert_eq!(geometry.frame_size().unwrap(), 1920 * 2 * 10 / 8 * 1080);
    }
}
