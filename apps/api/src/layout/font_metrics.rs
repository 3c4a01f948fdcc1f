//! Static font-metric tables for the two weights of each output typeface.
//!
//! Widths are AFM advance widths in 1/1000 em, the same numbers a PDF viewer uses
//! for the standard Type1 faces, so measured line widths match what gets drawn.
//! Tables are indexed by WinAnsi byte: every string is encoded with
//! [`encode_win_ansi`] before it is measured *and* before it is written, which
//! keeps measurement and output in lockstep.
//!
//! ASCII 0x20..=0x7E and Latin-1 0xA0..=0xFF are covered by dense tables. The
//! WinAnsi extras in 0x80..=0x9F that the encoder emits (bullet, dashes, curly
//! quotes) have explicit entries. The fallback width only applies to bytes the
//! encoder never produces.

use std::str::FromStr;

use crate::render::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Typeface + weight
// ────────────────────────────────────────────────────────────────────────────

/// The two weights a rendered resume may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Typeface family for generated documents. Exactly one family is used per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica / Helvetica-Bold. The default.
    Helvetica,
    /// Courier / Courier-Bold. Monospaced, every glyph is 600 units wide.
    Courier,
}

impl FontFamily {
    /// PDF `BaseFont` name of the standard Type1 face for this weight.
    pub fn base_font(self, weight: FontWeight) -> &'static str {
        match (self, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
            (FontFamily::Courier, FontWeight::Regular) => "Courier",
            (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
        }
    }

    /// Returns the static metric table for this family at the given weight.
    pub fn metrics(self, weight: FontWeight) -> &'static FontMetricTable {
        match (self, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => &HELVETICA_TABLE,
            (FontFamily::Helvetica, FontWeight::Bold) => &HELVETICA_BOLD_TABLE,
            (FontFamily::Courier, _) => &COURIER_TABLE,
        }
    }
}

impl FromStr for FontFamily {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Ok(FontFamily::Helvetica),
            "courier" => Ok(FontFamily::Courier),
            other => Err(RenderError::FontResource(format!(
                "unsupported typeface '{other}' (expected 'helvetica' or 'courier')"
            ))),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static advance-width table for one face.
///
/// Width array slot layout (`widths[i]` = byte `i + 32`):
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
/// `latin1[i]` = byte `i + 0xA0`, in code point order (nbsp first, ÿ last).
pub struct FontMetricTable {
    widths: [u16; 95],
    latin1: [u16; 96],
    /// WinAnsi bytes outside 0x20..=0x7E with known widths.
    extended: &'static [(u8, u16)],
    /// Width used for any byte not covered above.
    fallback: u16,
}

impl FontMetricTable {
    /// Advance width of a single WinAnsi byte, in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        if (32..=126).contains(&byte) {
            return self.widths[(byte - 32) as usize];
        }
        if byte >= 0xA0 {
            return self.latin1[(byte - 0xA0) as usize];
        }
        self.extended
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, w)| *w)
            .unwrap_or(self.fallback)
    }

    /// Measures the rendered width of a string in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(s)
            .into_iter()
            .map(|b| self.byte_width(b) as u32)
            .sum();
        units as f32 * size / 1000.0
    }

    /// Width of one space character in points at `size`.
    pub fn space_width(&self, size: f32) -> f32 {
        self.byte_width(b' ') as f32 * size / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Encodes text as WinAnsi bytes for a standard Type1 face.
///
/// Latin-1 maps directly; the typographic extras below map to their 0x80..0x9F
/// slots. Whitespace and control characters become spaces, anything else `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        c if c.is_whitespace() || c.is_control() => b' ',
        _ => b'?',
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    extended: &[
        (0x80, 556),
        (0x85, 1000),
        (0x91, 222),
        (0x92, 222),
        (0x93, 333),
        (0x94, 333),
        (0x95, 350),
        (0x96, 556),
        (0x97, 1000),
        (0x99, 1000),
    ],
    fallback: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    latin1: [
        // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    extended: &[
        (0x80, 556),
        (0x85, 1000),
        (0x91, 278),
        (0x92, 278),
        (0x93, 500),
        (0x94, 500),
        (0x95, 350),
        (0x96, 556),
        (0x97, 1000),
        (0x99, 1000),
    ],
    fallback: 611,
};

/// Courier is monospaced in both weights.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [600; 95],
    latin1: [600; 96],
    extended: &[],
    fallback: 600,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
