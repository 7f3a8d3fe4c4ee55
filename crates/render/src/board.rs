use std::{
    io::Cursor,
    sync::{Arc, LazyLock},
};

use {
    image::{DynamicImage, ImageFormat, RgbaImage},
    resvg::{
        tiny_skia::{Pixmap, Transform},
        usvg::{self, fontdb},
    },
    shakmaty::{Board, Square},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    svg,
};

/// RGBA colour, alpha last.
pub type Color = [u8; 4];

/// Fonts for the coordinate labels, loaded once per process. Labels are
/// skipped when the host has no usable font.
static SYSTEM_FONTS: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();
    debug!(faces = fonts.len(), "loaded system fonts");
    Arc::new(fonts)
});

/// Default edge length of the rendered image in pixels.
pub const DEFAULT_SIZE: u32 = 350;

/// Smallest size at which squares remain a few pixels wide.
pub const MIN_SIZE: u32 = 32;

/// Colours used for a board image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub light_square: Color,
    pub dark_square: Color,
    pub margin: Color,
    pub coordinate: Color,
    pub check: Color,
    pub white_piece: Color,
    pub black_piece: Color,
    pub outline: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: [0xff, 0xce, 0x9e, 0xff],
            dark_square: [0xd1, 0x8b, 0x47, 0xff],
            margin: [0x21, 0x21, 0x21, 0xff],
            coordinate: [0xe5, 0xe5, 0xe5, 0xff],
            check: [0xff, 0x00, 0x00, 0xff],
            white_piece: [0xff, 0xff, 0xff, 0xff],
            black_piece: [0x00, 0x00, 0x00, 0xff],
            outline: [0x00, 0x00, 0x00, 0xff],
        }
    }
}

/// An arrow from the centre of one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

/// Per-image options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Edge length of the square image in pixels, margin included.
    pub size: u32,
    /// Draw from Black's side (rank 8 at the bottom).
    pub flipped: bool,
    pub coordinates: bool,
    /// Square to mark with a radial check highlight.
    pub check: Option<Square>,
    /// Drawn in order, so later arrows sit on top.
    pub arrows: Vec<Arrow>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            flipped: false,
            coordinates: true,
            check: None,
            arrows: Vec::new(),
        }
    }
}

/// Draws positions as SVG and rasterizes them to PNG.
#[derive(Debug, Clone, Default)]
pub struct BoardRenderer {
    theme: Theme,
}

impl BoardRenderer {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The board as an SVG document sized `options.size` pixels square.
    #[must_use]
    pub fn render_svg(&self, board: &Board, options: &RenderOptions) -> String {
        svg::board_svg(board, options, &self.theme)
    }

    /// Render and encode as PNG. The bytes live only in memory, so
    /// concurrent renders never share an output file.
    pub fn render_png(&self, board: &Board, options: &RenderOptions) -> Result<Vec<u8>> {
        let image = self.render(board, options)?;
        let mut output = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image).write_to(&mut output, ImageFormat::Png)?;
        let bytes = output.into_inner();
        debug!(
            size = options.size,
            flipped = options.flipped,
            arrows = options.arrows.len(),
            check = options.check.is_some(),
            bytes = bytes.len(),
            "rendered board"
        );
        Ok(bytes)
    }

    /// Render to a raw RGBA image.
    pub fn render(&self, board: &Board, options: &RenderOptions) -> Result<RgbaImage> {
        if options.size < MIN_SIZE {
            return Err(Error::TooSmall { size: options.size });
        }
        rasterize(&self.render_svg(board, options), options.size)
    }
}

fn rasterize(svg: &str, size: u32) -> Result<RgbaImage> {
    let options = usvg::Options {
        fontdb: Arc::clone(&SYSTEM_FONTS),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)?;
    let mut pixmap = Pixmap::new(size, size).ok_or(Error::Allocate { size })?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(size, size, pixels).ok_or(Error::Allocate { size })
}
