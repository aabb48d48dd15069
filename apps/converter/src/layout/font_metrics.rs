//! Static font-metric table for the built-in Helvetica face.
//!
//! Widths are advance widths in AFM units (1/1000 em), taken from the standard
//! Helvetica AFM under WinAnsiEncoding. Characters are first mapped to their
//! WinAnsi byte (`win_ansi_byte`), so a character is always measured as the
//! glyph that is actually drawn: ASCII 0x20..=0x7E uses `widths`,
//! 0x80..=0xFF uses `high_widths`, and anything unmappable is drawn and
//! measured as `?`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Fixed layout parameters for a generated document. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Inset applied on all four edges.
    pub margin_pt: f32,
    /// Vertical distance between consecutive baselines.
    pub line_height_pt: f32,
    pub font_size_pt: f32,
}

impl PageConfig {
    /// US letter (8.5" × 11"), 50pt margins, 12pt Helvetica on a 14pt baseline grid.
    pub fn letter() -> Self {
        PageConfig {
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            margin_pt: 50.0,
            line_height_pt: 14.0,
            font_size_pt: 12.0,
        }
    }

    /// Horizontal budget available to a single line.
    pub fn max_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    /// Baseline of the first line on every page.
    pub fn top_baseline(&self) -> f32 {
        self.page_height_pt - self.margin_pt
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::letter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Character-width table for a Type1 base font.
///
/// Width array slot layout:
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
pub struct FontMetricTable {
    /// PDF `BaseFont` name of the face.
    pub base_font: &'static str,
    widths: [u16; 95],
    /// Widths of WinAnsi bytes 0x80..=0xFF; index = byte - 0x80.
    high_widths: [u16; 128],
    /// Width of bytes no table covers (control codes).
    pub fallback_width: u16,
}

impl FontMetricTable {
    /// Advance width of a single character in AFM units, measured as the
    /// WinAnsi glyph it is drawn with.
    pub fn char_width(&self, c: char) -> u16 {
        match win_ansi_byte(c) {
            byte @ 0x20..=0x7e => self.widths[usize::from(byte - 0x20)],
            byte @ 0x80..=0xff => self.high_widths[usize::from(byte - 0x80)],
            _ => self.fallback_width,
        }
    }

    /// Total advance width of a string in AFM units.
    ///
    /// Summed as `u64`: a multi-million character word must not overflow.
    pub fn measure_units(&self, s: &str) -> u64 {
        s.chars().map(|c| u64::from(self.char_width(c))).sum()
    }

    /// Measures the rendered width of a string in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        units_to_pt(self.measure_units(s), size_pt)
    }

    /// Width of a single inter-word space in points at `size_pt`.
    pub fn space_width(&self, size_pt: f32) -> f32 {
        self.measure_str(" ", size_pt)
    }
}

/// Converts AFM units to points at the given font size.
pub fn units_to_pt(units: u64, size_pt: f32) -> f32 {
    units as f32 * size_pt / 1000.0
}

/// Maps a character onto its WinAnsiEncoding byte; unmappable characters
/// become `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

/// Helvetica, WinAnsiEncoding.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
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
    high_widths: [
        // €    ·    ‚    ƒ    „    …     †    ‡    ˆ    ‰     Š    ‹    Œ     ·    Ž    ·
        556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
        // ·    ‘    ’    “    ”    •    –    —     ˜    ™     š    ›    œ    ·    ž    Ÿ
        556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
        // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À    Á    Â    Ã    Ä    Å    Æ     Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    fallback_width: 556,
};

/// Returns the metric table for the document font.
pub fn helvetica() -> &'static FontMetricTable {
    &HELVETICA_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
