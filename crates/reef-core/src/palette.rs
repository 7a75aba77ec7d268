//! Muted deep-sea coral palette. Colors are intentionally desaturated; at
//! reef depth water absorbs warm wavelengths first.

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub base: [f32; 3],
    pub accent: [f32; 3],
}

pub const CORAL_PALETTES: [Palette; 8] = [
    // deep sea green (algae-tinted)
    Palette {
        base: [0.18, 0.28, 0.22],
        accent: [0.22, 0.34, 0.26],
    },
    // muted teal
    Palette {
        base: [0.2, 0.32, 0.34],
        accent: [0.25, 0.38, 0.4],
    },
    // dark mauve
    Palette {
        base: [0.3, 0.2, 0.28],
        accent: [0.36, 0.24, 0.32],
    },
    // dusty rose
    Palette {
        base: [0.38, 0.22, 0.22],
        accent: [0.42, 0.26, 0.25],
    },
    // weathered brown
    Palette {
        base: [0.3, 0.24, 0.18],
        accent: [0.36, 0.28, 0.2],
    },
    // deep olive
    Palette {
        base: [0.22, 0.26, 0.16],
        accent: [0.28, 0.32, 0.2],
    },
    // slate blue-grey
    Palette {
        base: [0.22, 0.25, 0.3],
        accent: [0.26, 0.3, 0.36],
    },
    // dark rust
    Palette {
        base: [0.32, 0.18, 0.14],
        accent: [0.38, 0.22, 0.16],
    },
];

#[inline]
pub fn palette(index: usize) -> &'static Palette {
    &CORAL_PALETTES[index % CORAL_PALETTES.len()]
}

/// sRGB hex triple to linear-ish float color used for the shell parts, which
/// keep their warm nacre tones regardless of the cluster palette.
#[inline]
pub const fn hex(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    ]
}
