use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                (head_extra)
            }
            body {
                (content)
            }
        }
    }
}
