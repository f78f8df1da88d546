use serde::Deserialize;

/// Elemental tag of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Pyro,
    Cryo,
    Hydro,
    Dendro,
    Anemo,
    Geo,
    Electro,
}

/// How an element is drawn on a guide card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayAttributes {
    pub color: u32,
    /// Custom server emoji markup.
    pub emoji: &'static str,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Pyro,
        Element::Cryo,
        Element::Hydro,
        Element::Dendro,
        Element::Anemo,
        Element::Geo,
        Element::Electro,
    ];

    pub fn display(self) -> DisplayAttributes {
        let (color, emoji) = match self {
            Element::Pyro => (0xff_93_5e, "<:_:1372712159661916212>"),
            Element::Cryo => (0xab_fa_fa, "<:_:1372712163516354631>"),
            Element::Hydro => (0x52_d2_ff, "<:_:1372712160869748758>"),
            Element::Dendro => (0xd0_f2_81, "<:_:1372712164439101450>"),
            Element::Anemo => (0x51_eb_ba, "<:_:1372712165408116828>"),
            Element::Geo => (0xe2_c8_3c, "<:geo:1372710383260930048>"),
            Element::Electro => (0xe1_a5_ff, "<:_:1372712162471972984>"),
        };

        DisplayAttributes { color, emoji }
    }
}

/// One build guide entry, as stored in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterInfo {
    pub character_name: String,
    pub guide_video_url: String,
    pub guide_image_url: String,
    pub character_icon_url: String,
    pub element: Element,
}

impl CharacterInfo {
    pub fn display(&self) -> DisplayAttributes {
        self.element.display()
    }
}
