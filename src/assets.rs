//! Image assets referenced by the built-in flows.
//!
//! Loading real artwork is outside this crate. Steps only ask the
//! [`AssetCatalog`] how big an asset is and then blit it through the render
//! surface, which draws a procedural stand-in. Every asset has a placeholder
//! size, so a step lays out the same way whether the artwork is present or not.
//!
//! ```ignore
//! let size = frame.assets.size_or_placeholder(Asset::MicroQr);
//! let qr = Rectangle::new(Point::new(0, 80 - size.height as i32), size);
//! surface.image(Asset::MicroQr, qr, 1.0);
//! ```

use embedded_graphics::prelude::Size;

/// Number of known assets.
pub const ASSET_COUNT: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Asset {
    /// Micro QR code for account binding, drawn full width.
    MicroQr,
    /// Boot logo shown during Power On.
    Logo,
    /// Charger lightning icon used by the update overlay.
    PowerIcon,
}

impl Asset {
    pub const ALL: [Self; ASSET_COUNT] = [Self::MicroQr, Self::Logo, Self::PowerIcon];

    const fn index(self) -> usize {
        match self {
            Self::MicroQr => 0,
            Self::Logo => 1,
            Self::PowerIcon => 2,
        }
    }

    /// Size used when the artwork is not available.
    pub const fn placeholder_size(self) -> Size {
        match self {
            Self::MicroQr => Size::new(160, 40),
            Self::Logo => Size::new(150, 40),
            Self::PowerIcon => Size::new(16, 16),
        }
    }
}

/// Known asset dimensions. Absent entries fall back to the placeholder size.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    sizes: [Option<Size>; ASSET_COUNT],
}

impl AssetCatalog {
    /// Catalog with nothing loaded.
    pub const fn new() -> Self { Self { sizes: [None; ASSET_COUNT] } }

    /// Record the real size of an asset.
    pub const fn register(
        &mut self,
        asset: Asset,
        size: Size,
    ) {
        self.sizes[asset.index()] = Some(size);
    }

    #[inline]
    pub const fn is_loaded(&self, asset: Asset) -> bool { self.sizes[asset.index()].is_some() }

    /// Real size if registered, otherwise the placeholder size.
    pub const fn size_or_placeholder(&self, asset: Asset) -> Size {
        match self.sizes[asset.index()] {
            Some(size) => size,
            None => asset.placeholder_size(),
        }
    }

    /// Size scaled to `width`, keeping the aspect ratio.
    pub const fn size_for_width(&self, asset: Asset, width: u32) -> Size {
        let size = self.size_or_placeholder(asset);
        if size.width == 0 {
            return Size::new(width, 0);
        }
        Size::new(width, size.height * width / size.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_uses_placeholder() {
        let catalog = AssetCatalog::new();
        for asset in Asset::ALL {
            assert!(!catalog.is_loaded(asset));
            assert_eq!(catalog.size_or_placeholder(asset), asset.placeholder_size());
        }
    }

    #[test]
    fn test_qr_placeholder_height_is_40() {
        let catalog = AssetCatalog::new();
        assert_eq!(catalog.size_for_width(Asset::MicroQr, 160).height, 40);
    }

    #[test]
    fn test_registered_size_wins() {
        let mut catalog = AssetCatalog::new();
        catalog.register(Asset::MicroQr, Size::new(320, 64));

        assert!(catalog.is_loaded(Asset::MicroQr));
        assert_eq!(catalog.size_for_width(Asset::MicroQr, 160), Size::new(160, 32), "Aspect ratio kept");
        assert!(!catalog.is_loaded(Asset::Logo), "Other assets unaffected");
    }

    #[test]
    fn test_zero_width_asset_does_not_divide_by_zero() {
        let mut catalog = AssetCatalog::new();
        catalog.register(Asset::Logo, Size::new(0, 10));
        assert_eq!(catalog.size_for_width(Asset::Logo, 150), Size::new(150, 0));
    }
}
