//! Feed renderer
//!
//! Pure functions from feed data to markup. Class lists follow the page's
//! Tailwind theme; all dynamic values go through [`Node`] escaping.

use super::dom;
use super::format::date_label;
use super::markdown::render_markdown;
use super::node::{el, icon, Element, Node};
use crate::feed::{CommentStyle, FeedEntry, Persona, RecordId, DEFAULT_AUTHOR, REACTION_EMOJIS};

const DEFAULT_TITLE: &str = "Ohne Titel";
const DEFAULT_MOOD: &str = "Neugierig 🐷";

/// Render the whole feed, or the empty-state card when there is nothing
pub fn render_feed(entries: &[FeedEntry]) -> String {
    feed_view(entries).render()
}

/// View tree of the whole feed
pub fn feed_view(entries: &[FeedEntry]) -> Node {
    if entries.is_empty() {
        return empty_state().into();
    }
    Node::Fragment(entries.iter().map(|e| entry_card(e).into()).collect())
}

fn empty_state() -> Element {
    el("div")
        .class("bg-white rounded-2xl border-2 border-dashed border-teal-200 p-6 text-center")
        .child(
            el("p")
                .class("text-lg font-hand text-teal-700 font-bold")
                .text("Noch nichts passiert 🙈"),
        )
        .child(
            el("p")
                .class("text-gray-600")
                .text("Frag Schweini, wann die nächsten Abenteuer eintreffen."),
        )
}

/// One entry card
pub fn entry_card(item: &FeedEntry) -> Element {
    let entry = &item.entry;
    let id = entry.id.as_str();

    let header = el("div")
        .class("flex flex-wrap justify-between items-center mb-4 font-hand font-bold text-lg gap-2")
        .child(
            el("span")
                .class("text-teal-600 bg-teal-50 px-3 py-1 rounded-lg border border-teal-200 transform -rotate-1")
                .text(date_label(entry)),
        )
        .child(
            el("span")
                .class("text-yellow-700 bg-yellow-50 px-3 py-1 rounded-lg border border-yellow-200 transform rotate-2")
                .text(non_empty(entry.mood.as_deref()).unwrap_or(DEFAULT_MOOD)),
        );

    let byline = el("div")
        .class("flex items-center gap-2 text-sm text-gray-500 mb-2")
        .child(icon("pen", "w-4 h-4"))
        .child(el("span").text(non_empty(entry.author.as_deref()).unwrap_or(DEFAULT_AUTHOR)));

    let body = el("div")
        .class("prose prose-teal max-w-none text-gray-700 leading-relaxed text-[1.05rem]")
        .child(render_markdown(entry.body.as_deref().unwrap_or("")));

    let content = el("div")
        .class("p-6 pt-8 pb-4")
        .child(header)
        .child(byline)
        .child(
            el("h3")
                .class("text-2xl font-hand font-bold text-gray-800 mb-3 leading-tight")
                .text(non_empty(entry.title.as_deref()).unwrap_or(DEFAULT_TITLE)),
        )
        .child(body);

    let reactions = el("div").class("flex flex-wrap gap-2 mb-4").children(
        REACTION_EMOJIS
            .iter()
            .map(|emoji| reaction_button(&entry.id, emoji, item.reactions.count(emoji))),
    );

    let comments = el("div")
        .class("space-y-3")
        .id(dom::comments_area_id(id))
        .children(
            item.comments
                .iter()
                .map(|c| comment_bubble(c.author.as_deref(), &c.body)),
        );

    let footer = el("div")
        .class("bg-gray-50 p-4 border-t-2 border-teal-100")
        .child(reactions)
        .child(comments)
        .child(comment_form(&entry.id));

    el("article")
        .class("bg-white rounded-2xl chaos-shadow border-2 border-teal-500 overflow-hidden relative")
        .id(dom::post_id(id))
        .child(el("div").class(
            "absolute -top-3 left-1/2 transform -translate-x-1/2 w-40 h-8 tape rotate-1 z-10 opacity-90",
        ))
        .child(content)
        .child(image_grid(&entry.images))
        .child(footer)
}

/// Image grid: nothing for no images, one column for one, two otherwise
pub fn image_grid(images: &[String]) -> Option<Element> {
    if images.is_empty() {
        return None;
    }
    let columns = if images.len() == 1 { "grid-cols-1" } else { "grid-cols-2" };

    let cards = images.iter().map(|src| {
        el("div")
            .class("aspect-square relative group overflow-hidden rounded-xl border-2 border-gray-100 cursor-pointer")
            .attr(dom::ATTR_LIGHTBOX_SRC, src.as_str())
            .child(
                el("img")
                    .attr("src", src.as_str())
                    .class("w-full h-full object-cover transition duration-500 group-hover:scale-110 group-hover:rotate-1")
                    .attr("alt", "Foto")
                    .attr("loading", "lazy"),
            )
    });

    Some(
        el("div")
            .class("px-3 pb-3")
            .child(el("div").class(format!("grid {} gap-2", columns)).children(cards)),
    )
}

/// Counter text of a reaction button (blank for zero)
pub fn count_label(count: u32) -> String {
    if count > 0 {
        count.to_string()
    } else {
        String::new()
    }
}

/// One reaction button
pub fn reaction_button(entry_id: &RecordId, emoji: &str, count: u32) -> Element {
    el("button")
        .attr(dom::ATTR_REACTION, emoji)
        .attr(dom::ATTR_ENTRY, entry_id.as_str())
        .class("btn-press flex items-center gap-1.5 bg-white px-3 py-1.5 rounded-full border-2 border-teal-100 shadow-sm hover:border-teal-300 transition select-none")
        .child(
            el("span")
                .class("text-xl leading-none filter drop-shadow-sm")
                .text(emoji),
        )
        .child(
            el("span")
                .class(format!("font-hand font-bold text-teal-600 {}", dom::COUNT_CLASS))
                .text(count_label(count)),
        )
}

/// One comment bubble, styled by author
pub fn comment_bubble(author: Option<&str>, body: &str) -> Element {
    let style = CommentStyle::for_author(author);
    el("div")
        .class(format!(
            "bg-white p-3 rounded-xl border {} text-sm shadow-sm relative ml-2",
            style.border
        ))
        .child(el("div").class(format!(
            "absolute w-3 h-3 {} rounded-full -left-4 top-4 border border-white shadow-sm",
            style.dot
        )))
        .child(
            el("span")
                .class(format!("font-hand font-bold {} text-base mr-1", style.name))
                .text(format!("{}:", non_empty(author).unwrap_or(DEFAULT_AUTHOR))),
        )
        .child(el("span").class("text-gray-700").text(body))
}

/// Comment form under an entry
pub fn comment_form(entry_id: &RecordId) -> Element {
    el("form")
        .class(format!("mt-4 flex gap-2 relative {}", dom::COMMENT_FORM_CLASS))
        .attr(dom::ATTR_ENTRY_ID, entry_id.as_str())
        .child(
            el("input")
                .attr("type", "text")
                .attr("name", dom::COMMENT_INPUT_NAME)
                .attr("placeholder", "Antworte Schweini...")
                .attr("autocomplete", "off")
                .class("w-full bg-white border-2 border-teal-200 rounded-full px-4 py-2 pr-12 focus:outline-none focus:border-teal-500 font-hand text-lg placeholder:text-gray-400"),
        )
        .child(
            el("button")
                .attr("type", "submit")
                .class("absolute right-1 top-1 bottom-1 bg-teal-500 text-white w-10 rounded-full flex items-center justify-center hover:bg-teal-600 transition btn-press")
                .child(icon("send", "w-4 h-4 ml-0.5")),
        )
}

/// Persona buttons for the chooser
pub fn render_identity_choices() -> String {
    Node::Fragment(Persona::ALL.iter().map(|p| persona_button(*p).into()).collect()).render()
}

fn persona_button(persona: Persona) -> Element {
    el("button")
        .attr(dom::ATTR_IDENTITY, persona.name())
        .class(format!(
            "{} p-3 rounded-xl border-2 flex flex-col items-center gap-1 hover:scale-[1.02] transition btn-press",
            persona.chip_classes()
        ))
        .child(el("span").class("text-2xl").text(persona.icon()))
        .child(el("span").class("font-hand font-bold").text(persona.name()))
}

/// Spinner shown while the feed loads
pub fn render_loading() -> String {
    el("div")
        .class("flex items-center gap-3 text-gray-500")
        .child(icon("loader", "w-5 h-5 animate-spin"))
        .child(el("span").text("Einträge werden geladen..."))
        .render()
}

/// Inline read failure, shown in place of the feed
pub fn render_load_error(message: &str) -> String {
    el("div").class("text-red-600").text(message).render()
}

/// Card shown when the backend is not configured
pub fn render_config_missing() -> String {
    el("div")
        .class("bg-white rounded-2xl border-2 border-amber-300 p-6 chaos-shadow")
        .child(
            el("p")
                .class("text-lg font-hand font-bold text-amber-700 mb-2")
                .text("Das Chaos-Funkgerät schnarcht!"),
        )
        .child(el("p").class("text-gray-700").text(
            "Gerade gibt es keinen Kontakt zur Schweini-Cloud. Versuch es später noch einmal oder weck das Funkgerät auf.",
        ))
        .render()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Comment, Entry};

    fn item(id: &str) -> FeedEntry {
        FeedEntry::new(Entry::new(id).title("Matsch").body("Heute *gesprungen*"))
    }

    #[test]
    fn test_empty_feed() {
        let html = render_feed(&[]);
        assert!(html.contains("Noch nichts passiert 🙈"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_one_card_per_entry() {
        let html = render_feed(&[item("1"), item("2")]);
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.contains(r#"id="post-1""#));
        assert!(html.contains(r#"id="comments-area-2""#));
        assert!(html.contains("<em>gesprungen</em>"));
        assert!(!html.contains("Noch nichts passiert"));
    }

    #[test]
    fn test_fallback_fields() {
        let html = entry_card(&FeedEntry::new(Entry::new("9"))).render();
        assert!(html.contains("Ohne Titel"));
        assert!(html.contains("Neugierig 🐷"));
        assert!(html.contains("<span>Schweini</span>"));
        assert!(html.contains("Gerade eben"));
    }

    #[test]
    fn test_reaction_buttons_and_counts() {
        let mut item = item("E");
        item.reactions.increment("🤣");
        item.reactions.increment("🤣");

        let html = entry_card(&item).render();
        assert_eq!(html.matches("data-reaction=").count(), 4);
        assert!(html.contains(r#"data-reaction="🤣" data-entry="E""#));
        assert!(html.contains("count-val\">2</span>"));
        assert_eq!(html.matches("count-val\"></span>").count(), 3);
    }

    #[test]
    fn test_image_grid_layouts() {
        assert!(image_grid(&[]).is_none());

        let one = image_grid(&["a.jpg".to_string()]).unwrap().render();
        assert!(one.contains("grid grid-cols-1 gap-2"));
        assert!(one.contains(r#"data-lightbox-src="a.jpg""#));

        let two = image_grid(&["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()])
            .unwrap()
            .render();
        assert!(two.contains("grid-cols-2"));
        assert_eq!(two.matches("<img").count(), 3);
    }

    #[test]
    fn test_comments_in_order_and_escaped() {
        let mut item = item("E");
        item.comments.push(Comment {
            id: None,
            entry_id: RecordId::new("E"),
            author: Some("Mama".to_string()),
            body: "erste".to_string(),
            created_at: None,
        });
        item.comments.push(Comment {
            id: None,
            entry_id: RecordId::new("E"),
            author: Some("<b>Onkel</b>".to_string()),
            body: "<img src=x onerror=alert(1)>".to_string(),
            created_at: None,
        });

        let html = entry_card(&item).render();
        let first = html.find("erste").unwrap();
        let second = html.find("&lt;img src=x").unwrap();
        assert!(first < second);
        assert!(html.contains("border-pink-300"));
        assert!(html.contains("&lt;b&gt;Onkel&lt;/b&gt;:"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn test_comment_form() {
        let html = comment_form(&RecordId::new("E")).render();
        assert!(html.contains("comment-form"));
        assert!(html.contains(r#"data-entry-id="E""#));
        assert!(html.contains(r#"name="text""#));
    }

    #[test]
    fn test_identity_choices() {
        let html = render_identity_choices();
        assert_eq!(html.matches("data-identity=").count(), 7);
        assert!(html.contains(r#"data-identity="Wonkel""#));
        assert!(html.contains("🤠"));
    }

    #[test]
    fn test_status_blocks() {
        assert!(render_loading().contains("Einträge werden geladen..."));
        assert_eq!(
            render_load_error("boom <x>"),
            r#"<div class="text-red-600">boom &lt;x&gt;</div>"#
        );
        assert!(render_config_missing().contains("Das Chaos-Funkgerät schnarcht!"));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "");
        assert_eq!(count_label(3), "3");
    }
}
