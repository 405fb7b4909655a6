use bike_runner_core::{Biome, PowerKind};

use crate::Color;

/// Feedback shown when a power-up effect changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerFeedback {
    /// A power-up was activated.
    Activated(PowerKind),
    /// The shield absorbed an obstacle.
    ShieldSpent,
}

impl PowerFeedback {
    /// HUD icon shown next to the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Activated(PowerKind::Shield) | Self::ShieldSpent => "hud-power-shield",
            Self::Activated(PowerKind::JumpBoost) => "hud-power-jump",
            Self::Activated(PowerKind::SpeedBoost) => "hud-power-speed",
            Self::Activated(PowerKind::DoublePoints) => "hud-power-double",
            Self::Activated(PowerKind::Magnet) => "hud-power-magnet",
        }
    }

    /// Message flashed on the HUD.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Activated(PowerKind::Shield) => "ESCUDO ACTIVO",
            Self::ShieldSpent => "ESCUDO CONSUMIDO",
            Self::Activated(PowerKind::JumpBoost) => "SUPER SALTO ACTIVADO",
            Self::Activated(PowerKind::SpeedBoost) => "VELOCIDAD AUMENTADA",
            Self::Activated(PowerKind::DoublePoints) => "PUNTOS DOBLES",
            Self::Activated(PowerKind::Magnet) => "IMÁN ACTIVADO",
        }
    }
}

/// Player tint with no power-up active.
pub const NEUTRAL_TINT: Color = Color::from_hex(0xffffff);

/// Player tint once the run is over.
pub const CRASH_TINT: Color = Color::from_hex(0xff5252);

/// Player tint while `kind` is active.
#[must_use]
pub const fn power_tint(kind: PowerKind) -> Color {
    match kind {
        PowerKind::Shield => Color::from_hex(0xfff066),
        PowerKind::JumpBoost => Color::from_hex(0x7fffd4),
        PowerKind::SpeedBoost => Color::from_hex(0xff4757),
        PowerKind::DoublePoints => Color::from_hex(0xffa502),
        PowerKind::Magnet => Color::from_hex(0xe056fd),
    }
}

/// Background layer colors of a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomePalette {
    /// Sky backdrop.
    pub sky: Color,
    /// Distant hill layer.
    pub far_hills: Color,
    /// Near hill layer.
    pub mid_hills: Color,
    /// Ground strip.
    pub ground: Color,
}

impl BiomePalette {
    /// Palette used while `biome` is active.
    #[must_use]
    pub const fn of(biome: Biome) -> Self {
        let [sky, far_hills, mid_hills, ground] = match biome {
            Biome::Desert => [0xffd89b, 0xffa751, 0xff8a3d, 0xe8a87c],
            Biome::Snow => [0xdaf2ff, 0xb8d9ff, 0x9cc5ff, 0xe8f4f8],
            Biome::Moon => [0x0a0a20, 0x1a1a3a, 0x2a2a4a, 0x4a4a6a],
            Biome::Volcano => [0x2b1b17, 0x5a2a1a, 0x8a3a1a, 0x3a3a3a],
        };
        Self {
            sky: Color::from_hex(sky),
            far_hills: Color::from_hex(far_hills),
            mid_hills: Color::from_hex(mid_hills),
            ground: Color::from_hex(ground),
        }
    }
}

/// Name shown in the biome banner.
#[must_use]
pub const fn biome_name(biome: Biome) -> &'static str {
    match biome {
        Biome::Desert => "DESIERTO",
        Biome::Snow => "NIEVE",
        Biome::Moon => "LUNA",
        Biome::Volcano => "VOLCÁN",
    }
}
