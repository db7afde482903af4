use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Warm "paper notebook" palette.
pub struct Paper;

impl Paper {
    pub fn skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Paper::INK);
        skin.bold.set_fg(Paper::HIGHLIGHT);
        skin.italic.set_fg(Paper::FADED);

        // Day headers
        skin.headers[0].set_fg(Paper::RUST);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        // Entry titles
        skin.headers[1].set_fg(Paper::OCHRE);
        skin.headers[1].add_attr(Attribute::Bold);
        skin.headers[1].align = Alignment::Left;

        skin.headers[2].set_fg(Paper::SAGE);

        skin.table.set_fg(Paper::FADED);
        skin.bullet.set_fg(Paper::RUST);
        skin.quote_mark.set_char('┃');
        skin.quote_mark.set_fg(Paper::FADED);
        skin.inline_code.set_fg(Paper::SAGE);
        skin.code_block.set_fg(Paper::OCHRE);

        skin
    }

    pub const INK: Color = Color::Rgb {
        r: 0xE6,
        g: 0xDF,
        b: 0xD3,
    }; // #E6DFD3
    pub const FADED: Color = Color::Rgb {
        r: 0x8C,
        g: 0x84,
        b: 0x78,
    }; // #8C8478
    pub const RUST: Color = Color::Rgb {
        r: 0xD0,
        g: 0x73,
        b: 0x4C,
    }; // #D0734C
    pub const OCHRE: Color = Color::Rgb {
        r: 0xE3,
        g: 0xB5,
        b: 0x5B,
    }; // #E3B55B
    pub const SAGE: Color = Color::Rgb {
        r: 0x9C,
        g: 0xB8,
        b: 0x8A,
    }; // #9CB88A
    pub const HIGHLIGHT: Color = Color::Rgb {
        r: 0xFF,
        g: 0xD8,
        b: 0x6B,
    }; // #FFD86B
    pub const WARN: Color = Color::Rgb {
        r: 0xE0,
        g: 0x5D,
        b: 0x5D,
    }; // #E05D5D
}
