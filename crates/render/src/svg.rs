//! Board markup. Everything is laid out in SVG user units, 45 per square,
//! and scaled to the requested pixel size by the `width`/`height` of the
//! root element.

use shakmaty::{Board, Square};

use crate::{
    board::{Arrow, Color, RenderOptions, Theme},
    pieces,
};

/// Edge of one square in user units.
pub const SQUARE: f32 = 45.0;

/// Width of the coordinate margin in user units.
pub const MARGIN: f32 = 15.0;

const CHECK_GRADIENT: &str = "check_gradient";

/// `attr="#rrggbb"`, plus a matching opacity attribute for translucent
/// colours.
pub(crate) fn paint(attr: &str, color: Color) -> String {
    let [r, g, b, a] = color;
    let mut out = format!(" {attr}=\"#{r:02x}{g:02x}{b:02x}\"");
    if a < u8::MAX {
        let opacity = attr.strip_suffix("-color").unwrap_or(attr);
        out.push_str(&format!(" {opacity}-opacity=\"{:.3}\"", f32::from(a) / 255.0));
    }
    out
}

/// Square geometry for one render.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub margin: f32,
    pub flipped: bool,
}

impl Layout {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            margin: if options.coordinates { MARGIN } else { 0.0 },
            flipped: options.flipped,
        }
    }

    /// Edge of the whole drawing, margin included.
    pub fn extent(&self) -> f32 {
        8.0 * SQUARE + 2.0 * self.margin
    }

    /// Column and row (0 = left/top) at which `sq` is drawn.
    pub fn cell(&self, sq: Square) -> (u32, u32) {
        let file = sq.file() as u32;
        let rank = sq.rank() as u32;
        if self.flipped {
            (7 - file, rank)
        } else {
            (file, 7 - rank)
        }
    }

    pub fn origin(&self, sq: Square) -> (f32, f32) {
        let (col, row) = self.cell(sq);
        (
            self.margin + col as f32 * SQUARE,
            self.margin + row as f32 * SQUARE,
        )
    }

    pub fn centre(&self, sq: Square) -> (f32, f32) {
        let (x, y) = self.origin(sq);
        (x + SQUARE / 2.0, y + SQUARE / 2.0)
    }
}

/// Complete SVG document for `board`.
pub(crate) fn board_svg(board: &Board, options: &RenderOptions, theme: &Theme) -> String {
    let layout = Layout::new(options);
    let extent = layout.extent();
    let size = options.size;

    let mut defs = pieces::definitions(theme);
    if options.check.is_some() {
        defs.push_str(&format!(
            "<radialGradient id=\"{CHECK_GRADIENT}\" r=\"0.5\">\
<stop offset=\"0\"{}/>\
<stop offset=\"0.5\"{}/>\
<stop offset=\"1\"{} stop-opacity=\"0\"/>\
</radialGradient>",
            paint("stop-color", theme.check),
            paint("stop-color", theme.check),
            paint("stop-color", [theme.check[0], theme.check[1], theme.check[2], u8::MAX]),
        ));
    }

    let mut body = String::new();
    if options.coordinates {
        body.push_str(&format!(
            "<rect width=\"{extent}\" height=\"{extent}\"{}/>",
            paint("fill", theme.margin)
        ));
    }
    squares(&mut body, &layout, theme);
    if let Some(sq) = options.check {
        let (x, y) = layout.origin(sq);
        body.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{SQUARE}\" height=\"{SQUARE}\" fill=\"url(#{CHECK_GRADIENT})\"/>"
        ));
    }
    for sq in (0..64).map(Square::new) {
        if let Some(piece) = board.piece_at(sq) {
            let (x, y) = layout.origin(sq);
            body.push_str(&format!(
                "<use xlink:href=\"#{}\" transform=\"translate({x} {y})\"/>",
                pieces::id(piece)
            ));
        }
    }
    for arrow in &options.arrows {
        if let Some(markup) = arrow_markup(&layout, arrow) {
            body.push_str(&markup);
        }
    }
    if options.coordinates {
        coordinates(&mut body, &layout, theme);
    }

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {extent} {extent}\">\
<defs>{defs}</defs>{body}</svg>"
    )
}

fn squares(out: &mut String, layout: &Layout, theme: &Theme) {
    out.push_str("<g shape-rendering=\"crispEdges\">");
    for sq in (0..64).map(Square::new) {
        let light = (sq.file() as u32 + sq.rank() as u32) % 2 == 1;
        let color = if light {
            theme.light_square
        } else {
            theme.dark_square
        };
        let (x, y) = layout.origin(sq);
        out.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{SQUARE}\" height=\"{SQUARE}\"{}/>",
            paint("fill", color)
        ));
    }
    out.push_str("</g>");
}

/// Shaft plus head, pointing from the centre of `from` to just short of the
/// centre of `to`. `None` when both squares are the same.
fn arrow_markup(layout: &Layout, arrow: &Arrow) -> Option<String> {
    let (fx, fy) = layout.centre(arrow.from);
    let (tx, ty) = layout.centre(arrow.to);
    let (dx, dy) = (tx - fx, ty - fy);
    let len = dx.hypot(dy);
    if len <= f32::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);

    let tip = (tx - ux * SQUARE * 0.1, ty - uy * SQUARE * 0.1);
    let head_len = SQUARE * 0.45;
    let half_width = SQUARE * 0.3;
    let base = (tip.0 - ux * head_len, tip.1 - uy * head_len);
    // overlap the head slightly so no seam shows between the two shapes
    let shaft_end = (base.0 + ux, base.1 + uy);

    let [r, g, b, a] = arrow.color;
    let solid = [r, g, b, u8::MAX];
    // group opacity so the overlap is not blended twice
    Some(format!(
        "<g opacity=\"{:.3}\">\
<line x1=\"{fx:.2}\" y1=\"{fy:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{} stroke-width=\"{}\" stroke-linecap=\"butt\"/>\
<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\"{}/>\
</g>",
        f32::from(a) / 255.0,
        shaft_end.0,
        shaft_end.1,
        paint("stroke", solid),
        SQUARE * 0.2,
        tip.0,
        tip.1,
        base.0 - uy * half_width,
        base.1 + ux * half_width,
        base.0 + uy * half_width,
        base.1 - ux * half_width,
        paint("fill", solid),
    ))
}

/// File letters above and below the board, rank digits on both sides.
fn coordinates(out: &mut String, layout: &Layout, theme: &Theme) {
    const FONT_SIZE: f32 = 12.0;
    // centre glyphs vertically on their anchor point
    let baseline = FONT_SIZE * 0.35;
    let near = layout.margin / 2.0;
    let far = layout.extent() - layout.margin / 2.0;

    out.push_str(&format!(
        "<g font-family=\"DejaVu Sans, Helvetica, Arial, sans-serif\" font-size=\"{FONT_SIZE}\" \
font-weight=\"bold\" text-anchor=\"middle\"{}>",
        paint("fill", theme.coordinate)
    ));
    for i in 0..8u8 {
        let mid = layout.margin + (f32::from(i) + 0.5) * SQUARE;
        let (file, rank) = if layout.flipped { (7 - i, i) } else { (i, 7 - i) };
        let file_char = char::from(b'a' + file);
        let rank_char = char::from(b'1' + rank);

        for y in [near, far] {
            out.push_str(&format!(
                "<text x=\"{mid:.1}\" y=\"{:.1}\">{file_char}</text>",
                y + baseline
            ));
        }
        for x in [near, far] {
            out.push_str(&format!(
                "<text x=\"{x:.1}\" y=\"{:.1}\">{rank_char}</text>",
                mid + baseline
            ));
        }
    }
    out.push_str("</g>");
}
