//! Guide card and guide list rendering.

use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder, ImageSource};

use noelle_data::CharacterInfo;
use noelle_utils::embed::build_listing_embed;
use noelle_utils::pagination::{DiscordPage, PageSelect, chunk_pages};

pub const LIST_TITLE: &str = "Lista dos Nossos Guias!";
pub const LIST_THUMBNAIL_URL: &str =
    "https://cdn.discordapp.com/attachments/1372695311369109594/1404896788451688539/Noelle_List.png";
pub const NAMES_PER_PAGE: usize = 10;
pub const PICK_PLACEHOLDER: &str = "Ver personagem";

const GUIDE_FOOTER: &str = "Tudo é só recomendação — builde seu personagem com o que você tem e o que fizer sentido pro seu jogo!";
const GUIDE_FOOTER_ICON_URL: &str =
    "https://cdn.discordapp.com/attachments/1372695311369109594/1372890662961152070/warning-genshin.png";

pub fn not_found_message(name: &str) -> String {
    format!("Personagem ({name}) não encontrado.")
}

pub fn empty_list_message() -> &'static str {
    "Nenhum guia disponível no momento."
}

pub fn guide_description(character: &CharacterInfo) -> String {
    format!(
        "## {} {}\n\n> ### Guia Detalhado no YouTube:\n> ## [Link do Vídeo!]({})",
        character.display().emoji,
        character.character_name,
        character.guide_video_url
    )
}

/// Build the guide card for one character, colored by element.
pub fn build_character_guide(character: &CharacterInfo) -> anyhow::Result<Embed> {
    let footer = EmbedFooterBuilder::new(GUIDE_FOOTER)
        .icon_url(ImageSource::url(GUIDE_FOOTER_ICON_URL)?)
        .build();

    let embed = EmbedBuilder::new()
        .description(guide_description(character))
        .color(character.display().color)
        .image(ImageSource::url(&character.guide_image_url)?)
        .thumbnail(ImageSource::url(&character.character_icon_url)?)
        .footer(footer)
        .validate()?
        .build();

    Ok(embed)
}

/// One list page per chunk of [`NAMES_PER_PAGE`] names, each with a select
/// menu over the names it shows.
pub fn build_list_pages(names: &[&str]) -> anyhow::Result<Vec<DiscordPage>> {
    chunk_pages(names, NAMES_PER_PAGE)
        .into_iter()
        .map(|chunk| {
            let embed = build_listing_embed(LIST_TITLE, chunk.join("\n"), Some(LIST_THUMBNAIL_URL))?;
            let select = PageSelect::new(PICK_PLACEHOLDER, chunk.iter().copied());
            Ok::<_, anyhow::Error>(DiscordPage::new(embed).with_select(select))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use noelle_data::Element;

    use super::*;

    fn albedo() -> CharacterInfo {
        CharacterInfo {
            character_name: "Albedo".to_owned(),
            guide_video_url: "https://youtu.be/albedo".to_owned(),
            guide_image_url: "https://cdn.example/albedo.png".to_owned(),
            character_icon_url: "https://cdn.example/albedo-icon.png".to_owned(),
            element: Element::Geo,
        }
    }

    #[test]
    fn guide_card_uses_element_color_and_links() {
        let embed = build_character_guide(&albedo()).expect("embed");

        assert_eq!(embed.color, Some(Element::Geo.display().color));
        let description = embed.description.expect("description");
        assert!(description.starts_with("## <:geo:1372710383260930048> Albedo"));
        assert!(description.contains("(https://youtu.be/albedo)"));
        assert_eq!(
            embed.image.map(|image| image.url),
            Some("https://cdn.example/albedo.png".to_owned())
        );
        assert_eq!(
            embed.footer.map(|footer| footer.text),
            Some(GUIDE_FOOTER.to_owned())
        );
        assert!(GUIDE_FOOTER.starts_with("Tudo é só recomendação — builde seu personagem"));
    }

    #[test]
    fn guide_card_rejects_broken_image_urls() {
        let mut character = albedo();
        character.guide_image_url = "albedo.png".to_owned();
        assert!(build_character_guide(&character).is_err());
    }

    #[test]
    fn list_pages_hold_ten_names_each() {
        let names: Vec<String> = (1..=23).map(|index| format!("Character {index}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let pages = build_list_pages(&names).expect("pages");

        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages[0].embed.description.as_deref().map(|text| text.lines().count()),
            Some(10)
        );
        assert_eq!(
            pages[2].embed.description.as_deref(),
            Some("Character 21\nCharacter 22\nCharacter 23")
        );
        assert!(pages.iter().all(|page| page.embed.title.as_deref() == Some(LIST_TITLE)));
    }

    #[test]
    fn each_list_page_offers_its_own_names() {
        let names: Vec<String> = (1..=12).map(|index| format!("Character {index}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let pages = build_list_pages(&names).expect("pages");

        let second = pages[1].select.as_ref().expect("select");
        assert_eq!(second.placeholder, PICK_PLACEHOLDER);
        assert_eq!(second.options, ["Character 11", "Character 12"]);
        assert_eq!(pages[0].select.as_ref().map(|select| select.options.len()), Some(10));
    }
}
