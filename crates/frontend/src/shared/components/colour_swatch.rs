use contracts::shared::catalogue::colour::normalize_hex;
use contracts::shared::catalogue::ColourSwatch;
use leptos::prelude::*;

/// Образец цвета декора: квадрат с hex и подпись категории
#[component]
pub fn ColourSwatchView(
    /// Сохранённая JSON-строка цвета
    #[prop(into)]
    raw: String,
) -> impl IntoView {
    let Some(swatch) = ColourSwatch::parse(&raw) else {
        return view! { <span class="colour-swatch colour-swatch--empty">"-"</span> }.into_any();
    };

    let category = swatch
        .category()
        .map(|c| c.as_str().to_string())
        .unwrap_or_default();
    let hex = swatch.hex.as_deref().and_then(normalize_hex).unwrap_or_default();
    let style = if hex.is_empty() {
        String::new()
    } else {
        format!("background-color: {};", hex)
    };

    view! {
        <span class="colour-swatch" title=hex>
            <span class="colour-swatch__chip" style=style></span>
            <span class="colour-swatch__label">{category}</span>
        </span>
    }
    .into_any()
}
