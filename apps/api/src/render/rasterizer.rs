//! tiny-skia painter for [`LayoutDocument`].
//!
//! Two passes: a planning pass flows text (greedy word-wrap), badges, and
//! rules into absolutely-positioned paint ops while tracking the vertical
//! cursor, then a paint pass executes the ops into a pixmap and encodes it
//! as a lossless PNG. Glyphs are filled from `ttf-parser` outlines; there is
//! no text API in tiny-skia, outlines are the text API.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use ttf_parser::OutlineBuilder;

use crate::layout::document::{Header, LayoutDocument, Section, SkillBadge};
use crate::layout::sections::PROJECT_LINK_TEXT;
use crate::layout::theme::{Color, Theme};
use crate::render::fonts::{FontStore, FontWeight, TypeFace};
use crate::render::surface::{CaptureError, Raster};

/// Upper bound on either pixmap dimension, after supersampling.
const MAX_DIMENSION: u32 = 16_384;

/// Paints the document and captures it as a PNG raster.
pub fn rasterize(
    doc: &LayoutDocument,
    theme: &Theme,
    fonts: &FontStore,
    scale: f32,
) -> Result<Raster, CaptureError> {
    let regular = fonts.typeface(FontWeight::Regular)?;
    let bold = fonts.typeface(FontWeight::Bold)?;

    let mut planner = Planner::new(theme, &regular, &bold, scale);
    planner.plan(doc);
    let (ops, width, height) = planner.finish();

    let width_px = width.ceil() as u32;
    let height_px = height.ceil().max(1.0) as u32;
    if width_px == 0 || width_px > MAX_DIMENSION || height_px > MAX_DIMENSION {
        return Err(CaptureError::Allocation {
            width: width_px,
            height: height_px,
        });
    }

    paint(&ops, width_px, height_px, theme, &regular, &bold)
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap: words accumulate on a line until the next word would
/// exceed `max_width`. A single over-long word still gets its own line —
/// words are never split.
pub(crate) fn wrap_text(
    text: &str,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current = word.to_string();
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Paint plan
// ────────────────────────────────────────────────────────────────────────────

enum PaintOp {
    Text {
        x: f32,
        baseline: f32,
        px: f32,
        weight: FontWeight,
        color: Color,
        text: String,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Color,
        width: f32,
    },
    RectOutline {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        width: f32,
    },
}

struct Planner<'a> {
    theme: &'a Theme,
    regular: &'a TypeFace<'a>,
    bold: &'a TypeFace<'a>,
    scale: f32,
    width: f32,
    cursor: f32,
    ops: Vec<PaintOp>,
}

impl<'a> Planner<'a> {
    fn new(theme: &'a Theme, regular: &'a TypeFace<'a>, bold: &'a TypeFace<'a>, scale: f32) -> Self {
        let width = theme.content_width * scale;
        Self {
            theme,
            regular,
            bold,
            scale,
            width,
            cursor: 0.0,
            ops: Vec::new(),
        }
    }

    fn finish(self) -> (Vec<PaintOp>, f32, f32) {
        (self.ops, self.width, self.cursor)
    }

    // ── geometry helpers ────────────────────────────────────────────────────

    fn px(&self, size: f32) -> f32 {
        size * self.scale
    }

    fn left(&self) -> f32 {
        self.px(self.theme.margin)
    }

    fn right(&self) -> f32 {
        self.width - self.left()
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * self.left()
    }

    fn typeface(&self, weight: FontWeight) -> &'a TypeFace<'a> {
        match weight {
            FontWeight::Regular => self.regular,
            FontWeight::Bold => self.bold,
        }
    }

    fn line_advance(&self, px: f32) -> f32 {
        px * self.theme.line_height
    }

    fn push_text(
        &mut self,
        x: f32,
        baseline: f32,
        px: f32,
        weight: FontWeight,
        color: Color,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push(PaintOp::Text {
            x,
            baseline,
            px,
            weight,
            color,
            text: text.to_string(),
        });
    }

    // ── text flow primitives ────────────────────────────────────────────────

    /// One left-aligned line at the cursor; advances the cursor.
    fn line_left(&mut self, text: &str, size: f32, weight: FontWeight, color: Color) {
        let px = self.px(size);
        let baseline = self.cursor + self.typeface(weight).ascent(px);
        let left = self.left();
        self.push_text(left, baseline, px, weight, color, text);
        self.cursor += self.line_advance(px);
    }

    /// One horizontally-centered line at the cursor; advances the cursor.
    fn line_centered(&mut self, text: &str, size: f32, weight: FontWeight, color: Color) {
        let px = self.px(size);
        let text_width = self.typeface(weight).measure(text, px);
        let x = (self.width - text_width) / 2.0;
        let baseline = self.cursor + self.typeface(weight).ascent(px);
        self.push_text(x, baseline, px, weight, color, text);
        self.cursor += self.line_advance(px);
    }

    /// Word-wrapped block at full content width; advances the cursor.
    fn block(&mut self, text: &str, size: f32, weight: FontWeight, color: Color) {
        let px = self.px(size);
        let face = self.typeface(weight);
        let lines = wrap_text(text, self.content_width(), |candidate| {
            face.measure(candidate, px)
        });
        for line in lines {
            self.line_left(&line, size, weight, color);
        }
    }

    /// Like [`Self::block`] but preserving embedded newlines (an empty
    /// segment keeps its vertical space).
    fn block_pre_line(&mut self, text: &str, size: f32, weight: FontWeight, color: Color) {
        let px = self.px(size);
        for segment in text.split('\n') {
            if segment.trim().is_empty() {
                self.cursor += self.line_advance(px);
            } else {
                self.block(segment, size, weight, color);
            }
        }
    }

    /// Left/right pair on a shared baseline (e.g. job title + duration).
    fn split_line(
        &mut self,
        leading: (&str, f32, FontWeight, Color),
        trailing: Option<(&str, f32, FontWeight, Color)>,
    ) {
        let (lead_text, lead_size, lead_weight, lead_color) = leading;
        let lead_px = self.px(lead_size);
        let baseline = self.cursor + self.typeface(lead_weight).ascent(lead_px);
        let left = self.left();
        self.push_text(left, baseline, lead_px, lead_weight, lead_color, lead_text);

        if let Some((tail_text, tail_size, tail_weight, tail_color)) = trailing {
            let tail_px = self.px(tail_size);
            let tail_width = self.typeface(tail_weight).measure(tail_text, tail_px);
            let x = self.right() - tail_width;
            self.push_text(x, baseline, tail_px, tail_weight, tail_color, tail_text);
        }

        self.cursor += self.line_advance(lead_px);
    }

    /// Horizontal flow of plain labels, wrapping at the right edge.
    fn label_flow(&mut self, labels: &[String], size: f32, weight: FontWeight, color: Color) {
        let px = self.px(size);
        let gap = self.px(self.theme.badge_gap) * 2.0;
        let row_advance = self.line_advance(px);
        let ascent = self.typeface(weight).ascent(px);
        let left = self.left();
        let mut x = left;
        let mut any = false;
        for label in labels {
            let label_width = self.typeface(weight).measure(label, px);
            if x > left && x + label_width > self.right() {
                x = left;
                self.cursor += row_advance;
            }
            let baseline = self.cursor + ascent;
            self.push_text(x, baseline, px, weight, color, label);
            x += label_width + gap;
            any = true;
        }
        if any {
            self.cursor += row_advance;
        }
    }

    fn divider(&mut self) {
        let gap = self.px(self.theme.section_gap) / 2.0;
        self.cursor += gap;
        let y = self.cursor;
        self.ops.push(PaintOp::Line {
            x0: self.left(),
            y0: y,
            x1: self.right(),
            y1: y,
            color: self.theme.rule,
            width: self.px(1.0),
        });
        self.cursor += gap;
    }

    // ── document flow ───────────────────────────────────────────────────────

    fn plan(&mut self, doc: &LayoutDocument) {
        self.cursor = self.px(self.theme.margin);
        self.header(&doc.header);
        self.divider();
        for (index, section) in doc.sections.iter().enumerate() {
            self.section(section);
            if index + 1 < doc.sections.len() {
                self.divider();
            }
        }
        self.cursor += self.px(self.theme.margin);
    }

    fn header(&mut self, header: &Header) {
        let theme = self.theme;
        self.line_centered(&header.full_name, theme.name_size, FontWeight::Bold, theme.accent);
        if let Some(location) = &header.location {
            self.line_centered(location, theme.lead_size, FontWeight::Regular, theme.muted);
        }
        if !header.contacts.is_empty() {
            let items: Vec<(String, Color)> = header
                .contacts
                .iter()
                .map(|item| (item.label.clone(), self.contact_color(item.href.is_some())))
                .collect();
            self.centered_row(&items, theme.body_size);
        }
        if !header.profiles.is_empty() {
            let items: Vec<(String, Color)> = header
                .profiles
                .iter()
                .map(|item| (item.label.clone(), self.contact_color(item.href.is_some())))
                .collect();
            self.centered_row(&items, theme.body_size);
        }
    }

    fn contact_color(&self, is_link: bool) -> Color {
        if is_link {
            self.theme.link
        } else {
            self.theme.muted
        }
    }

    /// Centered row of independently-colored items with fixed gaps.
    fn centered_row(&mut self, items: &[(String, Color)], size: f32) {
        let px = self.px(size);
        let gap = self.px(self.theme.item_gap);
        let total: f32 = items
            .iter()
            .map(|(text, _)| self.regular.measure(text, px))
            .sum::<f32>()
            + gap * (items.len().saturating_sub(1)) as f32;
        let mut x = (self.width - total) / 2.0;
        let baseline = self.cursor + self.regular.ascent(px);
        for (text, color) in items {
            self.push_text(x, baseline, px, FontWeight::Regular, *color, text);
            x += self.regular.measure(text, px) + gap;
        }
        self.cursor += self.line_advance(px);
    }

    fn heading(&mut self, title: &str) {
        let theme = self.theme;
        self.line_left(title, theme.heading_size, FontWeight::Bold, theme.accent);
        self.cursor += self.px(4.0);
    }

    fn section(&mut self, section: &Section) {
        self.heading(section.title());
        let theme = self.theme;
        match section {
            Section::Summary { text } => {
                self.block(text, theme.body_size, FontWeight::Regular, theme.ink);
            }
            Section::Skills { badges } => self.badge_flow(badges),
            Section::Experience { entries } => {
                for (index, item) in entries.iter().enumerate() {
                    self.split_line(
                        (item.job_title.as_str(), theme.title_size, FontWeight::Bold, theme.ink),
                        item.duration.as_deref().map(|duration| {
                            (duration, theme.small_size, FontWeight::Regular, theme.muted)
                        }),
                    );
                    let company_line = match &item.location {
                        Some(location) => format!("{} | {}", item.company, location),
                        None => item.company.clone(),
                    };
                    self.block(&company_line, theme.body_size, FontWeight::Regular, theme.muted);
                    if let Some(responsibility) = &item.responsibility {
                        self.block_pre_line(
                            responsibility,
                            theme.body_size,
                            FontWeight::Regular,
                            theme.ink,
                        );
                    }
                    if index + 1 < entries.len() {
                        self.cursor += self.px(theme.item_gap);
                    }
                }
            }
            Section::Education { entries } => {
                for (index, item) in entries.iter().enumerate() {
                    self.split_line(
                        (item.degree.as_str(), theme.title_size, FontWeight::Bold, theme.ink),
                        item.graduation_year.as_deref().map(|year| {
                            (year, theme.small_size, FontWeight::Bold, theme.accent)
                        }),
                    );
                    let university_line = format!(
                        "{}, {}",
                        item.university,
                        item.location.clone().unwrap_or_default()
                    );
                    self.block(&university_line, theme.body_size, FontWeight::Regular, theme.muted);
                    if index + 1 < entries.len() {
                        self.cursor += self.px(theme.item_gap);
                    }
                }
            }
            Section::Projects { entries } => {
                for (index, item) in entries.iter().enumerate() {
                    self.split_line(
                        (item.title.as_str(), theme.title_size, FontWeight::Bold, theme.ink),
                        item.github_link.as_deref().map(|_| {
                            (PROJECT_LINK_TEXT, theme.small_size, FontWeight::Regular, theme.link)
                        }),
                    );
                    if let Some(description) = &item.description {
                        self.block(description, theme.body_size, FontWeight::Regular, theme.ink);
                    }
                    if !item.technologies.is_empty() {
                        self.label_flow(
                            &item.technologies,
                            theme.small_size,
                            FontWeight::Regular,
                            theme.muted,
                        );
                    }
                    if index + 1 < entries.len() {
                        self.cursor += self.px(theme.item_gap);
                    }
                }
            }
            Section::Certifications { entries } => {
                for item in entries {
                    let line = format!("• {}", item.display_text());
                    self.block(&line, theme.body_size, FontWeight::Regular, theme.ink);
                    self.cursor += self.px(4.0);
                }
            }
            Section::Languages { labels } => {
                self.label_flow(labels, theme.body_size, FontWeight::Regular, theme.ink);
            }
        }
    }

    fn badge_flow(&mut self, badges: &[SkillBadge]) {
        let theme = self.theme;
        let px = self.px(theme.body_size);
        let pad_x = self.px(theme.badge_pad_x);
        let pad_y = self.px(theme.badge_pad_y);
        let gap = self.px(theme.badge_gap);
        let box_height = px + 2.0 * pad_y;
        let left = self.left();
        let mut x = left;
        let mut any = false;
        for badge in badges {
            let text = badge.display_text();
            let box_width = self.regular.measure(&text, px) + 2.0 * pad_x;
            if x > left && x + box_width > self.right() {
                x = left;
                self.cursor += box_height + gap;
            }
            self.ops.push(PaintOp::RectOutline {
                x,
                y: self.cursor,
                w: box_width,
                h: box_height,
                color: theme.rule,
                width: self.px(1.0),
            });
            let baseline = self.cursor + pad_y + self.regular.ascent(px);
            self.push_text(x + pad_x, baseline, px, FontWeight::Regular, theme.ink, &text);
            x += box_width + gap;
            any = true;
        }
        if any {
            self.cursor += box_height;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Painting
// ────────────────────────────────────────────────────────────────────────────

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Bridges ttf-parser glyph outlines into a tiny-skia path.
struct PathConverter(PathBuilder);

impl OutlineBuilder for PathConverter {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

fn paint(
    ops: &[PaintOp],
    width_px: u32,
    height_px: u32,
    theme: &Theme,
    regular: &TypeFace<'_>,
    bold: &TypeFace<'_>,
) -> Result<Raster, CaptureError> {
    let mut pixmap = Pixmap::new(width_px, height_px).ok_or(CaptureError::Allocation {
        width: width_px,
        height: height_px,
    })?;
    pixmap.fill(to_skia_color(theme.paper));

    for op in ops {
        match op {
            PaintOp::Text {
                x,
                baseline,
                px,
                weight,
                color,
                text,
            } => {
                let face = match weight {
                    FontWeight::Regular => regular,
                    FontWeight::Bold => bold,
                };
                draw_text(&mut pixmap, face, *x, *baseline, *px, *color, text);
            }
            PaintOp::Line {
                x0,
                y0,
                x1,
                y1,
                color,
                width,
            } => {
                let mut builder = PathBuilder::new();
                builder.move_to(*x0, *y0);
                builder.line_to(*x1, *y1);
                if let Some(path) = builder.finish() {
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(
                        &path,
                        &solid_paint(*color),
                        &stroke,
                        Transform::identity(),
                        None,
                    );
                }
            }
            PaintOp::RectOutline {
                x,
                y,
                w,
                h,
                color,
                width,
            } => {
                if let Some(rect) = Rect::from_xywh(*x, *y, *w, *h) {
                    let path = PathBuilder::from_rect(rect);
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(
                        &path,
                        &solid_paint(*color),
                        &stroke,
                        Transform::identity(),
                        None,
                    );
                }
            }
        }
    }

    let png = pixmap
        .encode_png()
        .map_err(|err| CaptureError::PngEncode(err.to_string()))?;
    Ok(Raster {
        width: width_px,
        height: height_px,
        png,
    })
}

fn draw_text(
    pixmap: &mut Pixmap,
    face: &TypeFace<'_>,
    x: f32,
    baseline: f32,
    px: f32,
    color: Color,
    text: &str,
) {
    let scale = face.scale(px);
    let paint = solid_paint(color);
    let mut pen_x = x;

    for c in text.chars() {
        let advance = face.advance_units(c) * scale;
        if let Some(glyph) = face.face().glyph_index(c) {
            let mut converter = PathConverter(PathBuilder::new());
            if face.face().outline_glyph(glyph, &mut converter).is_some() {
                if let Some(path) = converter.0.finish() {
                    // Font outlines are y-up; flip onto the y-down pixmap.
                    let transform =
                        Transform::from_scale(scale, -scale).post_translate(pen_x, baseline);
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
        }
        pen_x += advance;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
