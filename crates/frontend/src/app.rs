use contracts::shared::catalogue::CatalogueEntity;
use leptos::prelude::*;

use crate::domain::catalogue::ui::list::CatalogueList;
use crate::shared::icons::icon;

fn entity_icon(entity: CatalogueEntity) -> &'static str {
    match entity {
        CatalogueEntity::TestTiles => "tile",
        CatalogueEntity::ClayBodies => "clay",
        CatalogueEntity::Decorations => "palette",
        CatalogueEntity::Collections => "folder",
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Роутер не используем: раздел выбирается сигналом
    let (active, set_active) = signal(CatalogueEntity::TestTiles);

    view! {
        <div class="app-shell">
            <nav class="app-nav">
                <span class="app-nav__brand">"Pottery"</span>
                {CatalogueEntity::all()
                    .into_iter()
                    .map(|entity| {
                        view! {
                            <button
                                class=move || {
                                    if active.get() == entity {
                                        "app-nav__item app-nav__item--active"
                                    } else {
                                        "app-nav__item"
                                    }
                                }
                                on:click=move |_| set_active.set(entity)
                            >
                                {icon(entity_icon(entity))}
                                <span>{entity.title()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <main class="app-content">
                {move || {
                    let entity = active.get();
                    view! { <CatalogueList entity=entity /> }.into_any()
                }}
            </main>
        </div>
    }
}
