//! Piece glyphs as reusable SVG groups, drawn in a 45x45 box.

use shakmaty::{Color as Side, Piece, Role};

use crate::{board::Theme, svg::paint};

/// Outline and detail shapes of one piece.
struct Glyph {
    body: &'static str,
    details: &'static str,
}

const PAWN: Glyph = Glyph {
    body: "<path d=\"M18.5 18h8l3.5 16.5h-15z\"/>\
<circle cx=\"22.5\" cy=\"13\" r=\"5\"/>\
<path d=\"M11.5 34.5h22v4.5h-22z\"/>",
    details: "",
};

const KNIGHT: Glyph = Glyph {
    body: "<path d=\"M13.5 38.7L33.3 38.7L32.4 27L30.6 18L27 10.8L22.5 7.6L20.7 4.5L18.9 8.1L15.3 10.8L9.9 18.9L9 23.4L11.7 25.2L16.2 22.5L19.8 20.7L15.3 29.7Z\"/>\
<path d=\"M11.7 35.1h22.5v3.6h-22.5z\"/>",
    details: "<circle cx=\"18\" cy=\"13\" r=\"1\"/><path d=\"M11 21.5l1.5 -0.5\"/>",
};

const BISHOP: Glyph = Glyph {
    body: "<path d=\"M18.9 29.7h7.2l1.8 5.4h-10.8z\"/>\
<ellipse cx=\"22.5\" cy=\"22.5\" rx=\"6.75\" ry=\"9\"/>\
<circle cx=\"22.5\" cy=\"10.8\" r=\"2.5\"/>\
<path d=\"M11.7 34.2h21.6v4.5h-21.6z\"/>",
    details: "<path d=\"M21 17.5L25 22M18.5 30.6h8\"/>",
};

const ROOK: Glyph = Glyph {
    body: "<path d=\"M14.9 16.2h15.2l1.4 18h-18z\"/>\
<path d=\"M12 8h5v4h2.5v-4h6v4h2.5v-4h5v8.2h-21z\"/>\
<path d=\"M10.8 34.2h23.4v4.5h-23.4z\"/>",
    details: "<path d=\"M15 17.5h15M14 32.4h17\"/>",
};

const QUEEN: Glyph = Glyph {
    body: "<path d=\"M9.9 13.5L15.3 25.2L16.2 10.8L20.25 24.3L22.5 9L24.75 24.3L28.8 10.8L29.7 25.2L35.1 13.5L31.5 33.3H13.5Z\"/>\
<circle cx=\"9.9\" cy=\"12.6\" r=\"2\"/>\
<circle cx=\"16.2\" cy=\"9.9\" r=\"2\"/>\
<circle cx=\"22.5\" cy=\"8.1\" r=\"2\"/>\
<circle cx=\"28.8\" cy=\"9.9\" r=\"2\"/>\
<circle cx=\"35.1\" cy=\"12.6\" r=\"2\"/>\
<path d=\"M12.2 33.3h20.6v5.4h-20.6z\"/>",
    details: "<path d=\"M14 30h17\"/>",
};

const KING: Glyph = Glyph {
    body: "<path d=\"M21.2 3.6h2.6v8.1h-2.6z\"/>\
<path d=\"M18.5 5.85h8v2.7h-8z\"/>\
<path d=\"M10.8 18L18.9 19.8L22.5 18L26.1 19.8L34.2 18L31.5 33.3H13.5Z\"/>\
<circle cx=\"22.5\" cy=\"15.3\" r=\"3.6\"/>\
<path d=\"M12.2 33.3h20.6v5.4h-20.6z\"/>",
    details: "<path d=\"M22.5 20.7v9.3M14 30h17\"/>",
};

const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

fn glyph(role: Role) -> &'static Glyph {
    match role {
        Role::Pawn => &PAWN,
        Role::Knight => &KNIGHT,
        Role::Bishop => &BISHOP,
        Role::Rook => &ROOK,
        Role::Queen => &QUEEN,
        Role::King => &KING,
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Pawn => "pawn",
        Role::Knight => "knight",
        Role::Bishop => "bishop",
        Role::Rook => "rook",
        Role::Queen => "queen",
        Role::King => "king",
    }
}

/// Element id of the `<defs>` group for `piece`, e.g. `black-knight`.
#[must_use]
pub fn id(piece: Piece) -> String {
    let side = match piece.color {
        Side::White => "white",
        Side::Black => "black",
    };
    format!("{side}-{}", role_name(piece.role))
}

/// One `<g>` per piece, to be placed inside `<defs>`.
///
/// White pieces get dark detail lines, black pieces light ones.
#[must_use]
pub fn definitions(theme: &Theme) -> String {
    let mut defs = String::new();
    for side in [Side::White, Side::Black] {
        let (fill, detail) = match side {
            Side::White => (theme.white_piece, theme.outline),
            Side::Black => (theme.black_piece, theme.white_piece),
        };
        for role in ROLES {
            let glyph = glyph(role);
            defs.push_str(&format!(
                "<g id=\"{}\"{}{} stroke-width=\"1.5\" stroke-linejoin=\"round\">{}<g{}{}>{}</g></g>",
                id(Piece { color: side, role }),
                paint("fill", fill),
                paint("stroke", theme.outline),
                glyph.body,
                paint("fill", detail),
                paint("stroke", detail),
                glyph.details,
            ));
        }
    }
    defs
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_name_colour_and_role() {
        assert_eq!(
            id(Piece {
                color: Side::Black,
                role: Role::Knight
            }),
            "black-knight"
        );
        assert_eq!(
            id(Piece {
                color: Side::White,
                role: Role::King
            }),
            "white-king"
        );
    }

    #[test]
    fn every_piece_is_defined_once() {
        let defs = definitions(&Theme::default());
        assert_eq!(defs.matches("<g id=\"").count(), 12);
        for side in ["white", "black"] {
            for role in ROLES {
                let needle = format!("id=\"{side}-{}\"", role_name(role));
                assert_eq!(defs.matches(&needle).count(), 1, "{needle}");
            }
        }
    }

    #[test]
    fn black_details_use_the_light_colour() {
        let theme = Theme::default();
        let defs = definitions(&theme);
        let black = &defs[defs.find("id=\"black-pawn\"").unwrap()..];
        let inner = &black[black.find("<g").unwrap()..];
        assert!(inner.contains(&paint("stroke", theme.white_piece)));
    }
}
