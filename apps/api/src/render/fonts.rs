//! System font discovery and glyph measurement for the raster painter.
//!
//! Faces are discovered once at startup through `fontdb` and kept in memory;
//! `ttf-parser` provides advance widths and outlines on demand. A machine
//! with no usable sans-serif face cannot capture — that surfaces as a
//! `CaptureError`, not a crash.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use ttf_parser::Face;

use crate::render::surface::CaptureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

struct FaceData {
    data: Vec<u8>,
    index: u32,
}

/// In-memory regular + bold sans-serif faces.
pub struct FontStore {
    regular: FaceData,
    bold: FaceData,
}

impl FontStore {
    /// Loads the system font database and picks a generic sans-serif face in
    /// regular and bold weights. Bold falls back to the regular face when the
    /// system has no bold variant.
    pub fn discover() -> Result<Self, CaptureError> {
        let mut db = Database::new();
        db.load_system_fonts();
        let regular = Self::pick(&db, Weight::NORMAL)?;
        let bold = Self::pick(&db, Weight::BOLD).or_else(|_| Self::pick(&db, Weight::NORMAL))?;
        Ok(Self { regular, bold })
    }

    fn pick(db: &Database, weight: Weight) -> Result<FaceData, CaptureError> {
        let query = Query {
            families: &[Family::SansSerif],
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query).ok_or(CaptureError::FontUnavailable)?;
        db.with_face_data(id, |data, index| FaceData {
            data: data.to_vec(),
            index,
        })
        .ok_or(CaptureError::FontUnavailable)
    }

    pub fn typeface(&self, weight: FontWeight) -> Result<TypeFace<'_>, CaptureError> {
        let source = match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        };
        let face = Face::parse(&source.data, source.index)
            .map_err(|err| CaptureError::FontParse(err.to_string()))?;
        Ok(TypeFace::new(face))
    }
}

/// Measurement and outline access for one parsed face, in pixel units.
pub struct TypeFace<'a> {
    face: Face<'a>,
    units_per_em: f32,
}

impl<'a> TypeFace<'a> {
    pub fn new(face: Face<'a>) -> Self {
        let units_per_em = f32::from(face.units_per_em());
        Self { face, units_per_em }
    }

    pub fn face(&self) -> &Face<'a> {
        &self.face
    }

    /// Pixels per font unit at the given pixel size.
    pub fn scale(&self, px: f32) -> f32 {
        px / self.units_per_em
    }

    /// Advance width of one character in font units. Characters the face
    /// cannot map fall back to half an em, mirroring the average-width
    /// fallback of static metric tables.
    pub fn advance_units(&self, c: char) -> f32 {
        self.face
            .glyph_index(c)
            .and_then(|glyph| self.face.glyph_hor_advance(glyph))
            .map(f32::from)
            .unwrap_or(self.units_per_em * 0.5)
    }

    /// Rendered width of a string in pixels at the given size.
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        let scale = self.scale(px);
        text.chars().map(|c| self.advance_units(c)).sum::<f32>() * scale
    }

    pub fn ascent(&self, px: f32) -> f32 {
        f32::from(self.face.ascender()) * self.scale(px)
    }
}
