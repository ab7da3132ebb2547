//! Author card and caption of the published carousel.

const CARD_HTML: &str = include_str!("../assets/card.html");
const CARD_CSS: &str = include_str!("../assets/style.css");

/// HTML + CSS pair sent to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub html: String,
    pub css: String,
}

/// Fill the card template. `prompt` and `username` are escaped, the image URL is trusted.
pub fn render_card(prompt: &str, username: &str, image_url: &str, days: u32) -> Card {
    let html = CARD_HTML
        .replace("{{USERNAME}}", &escape_html(username))
        .replace("{{PROMPT}}", &escape_html(prompt))
        .replace("{{PROFILE_IMAGE_URL}}", image_url)
        .replace("{{DAYS}}", &days.to_string());
    Card {
        html,
        css: CARD_CSS.to_string(),
    }
}

pub fn caption(username: &str, days: u32) -> String {
    format!(
        "This artwork was chosen by the community 👇\n\
         \n\
         🏆 Prompt by @{username} (see slide 2)\n\
         \n\
         Want Otto to paint yours?\n\
         \n\
         ➕ Follow\n\
         ✏️ Comment on the latest post (start with \"Prompt:\")\n\
         ❤️ Like to vote\n\
         🏆 Most liked wins after {days} days\n\
         \n\
         #aiart #promptchallenge #communityart"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
