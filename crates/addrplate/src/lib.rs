#![forbid(unsafe_code)]

//! `addrplate` renders fixed-format street-name and house-number plates as vector graphics.
//!
//! The core crate is re-exported at the top level: house-number decomposition, the plate
//! geometry table and the request model.
//!
//! # Features
//!
//! - `render`: enable glyph composition, layout and SVG output (`addrplate::render`)
//! - `raster`: enable PDF/PNG output via pure-Rust SVG conversion

pub use addrplate_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use addrplate_render::model::{PlateElement, PlateLayout};
    pub use addrplate_render::surface::{Color, DrawOp, RecordingSurface, Surface};
    pub use addrplate_render::{
        GlyphStore, LayoutEngine, SvgSurface, TextComposer, TextRun, paint, wrap_words,
    };

    use addrplate_core::{GeometryTable, PlateRequest};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Input(#[from] addrplate_core::Error),
        #[error(transparent)]
        Render(#[from] addrplate_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Validates `request` and resolves every glyph and position on the plate.
    pub fn layout_plate(
        request: &PlateRequest,
        store: &GlyphStore,
        geometry: &GeometryTable,
    ) -> Result<PlateLayout> {
        Ok(addrplate_render::layout_plate(request, store, geometry)?)
    }

    /// Paints an already laid-out plate as a single-page SVG document.
    pub fn render_layout_svg(layout: &PlateLayout) -> String {
        let mut svg = SvgSurface::new();
        paint(layout, &mut svg);
        svg.into_svg()
    }

    /// Layout + SVG in one call. Nothing is written unless layout succeeds.
    pub fn render_svg(
        request: &PlateRequest,
        store: &GlyphStore,
        geometry: &GeometryTable,
    ) -> Result<String> {
        let layout = layout_plate(request, store, geometry)?;
        Ok(render_layout_svg(&layout))
    }

    /// Loads a glyph asset from disk.
    pub fn load_glyphs(path: impl AsRef<std::path::Path>) -> Result<GlyphStore> {
        Ok(GlyphStore::load(path)?)
    }

    /// Convenience wrapper that bundles a glyph store and a geometry table.
    #[derive(Debug, Clone, Copy)]
    pub struct PlateRenderer<'a> {
        pub store: &'a GlyphStore,
        pub geometry: &'a GeometryTable,
    }

    impl<'a> PlateRenderer<'a> {
        /// Uses the built-in geometry table.
        pub fn new(store: &'a GlyphStore) -> Self {
            Self {
                store,
                geometry: GeometryTable::builtin(),
            }
        }

        pub fn with_geometry(mut self, geometry: &'a GeometryTable) -> Self {
            self.geometry = geometry;
            self
        }

        pub fn layout(&self, request: &PlateRequest) -> Result<PlateLayout> {
            layout_plate(request, self.store, self.geometry)
        }

        pub fn render_svg(&self, request: &PlateRequest) -> Result<String> {
            render_svg(request, self.store, self.geometry)
        }
    }
}
