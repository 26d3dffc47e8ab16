use contracts::shared::catalogue::{
    Catalogue, CatalogueEntity, CatalogueQuery, FieldDescriptor, FieldKind, PageRequest,
    ViewMode, ViewPreferences,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::domain::catalogue::api;
use crate::shared::components::colour_swatch::ColourSwatchView;
use crate::shared::components::facet_select::FacetSelect;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, next_sort, SearchInput};
use crate::shared::storage::LocalStorageStore;

/// Ячейка таблицы/карточки: цвет рисуется образцом, остальное текстом с подсветкой
fn render_cell(descriptor: &FieldDescriptor, doc: &Value, search: &str) -> AnyView {
    match descriptor.kind {
        FieldKind::Colour => match descriptor.path.resolve_strings(doc).into_iter().next() {
            Some(raw) => view! { <ColourSwatchView raw=raw /> }.into_any(),
            None => view! { <span></span> }.into_any(),
        },
        _ => highlight_matches(&descriptor.display_value(doc), search),
    }
}

/// Список записей каталога с поиском, фасетами, сортировкой и страницами
#[component]
pub fn CatalogueList(entity: CatalogueEntity) -> impl IntoView {
    let schema = StoredValue::new(entity.schema());

    let (catalogue, set_catalogue) = signal(Catalogue::<Value>::default());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let query = RwSignal::new(CatalogueQuery::default());
    let prefs = RwSignal::new(ViewPreferences::load(&LocalStorageStore, entity.slug()));
    let filters_expanded = RwSignal::new(true);
    let columns_open = RwSignal::new(false);

    // Настройки вида сохраняются при каждом изменении
    Effect::new(move |_| {
        prefs.with(|p| p.save(&LocalStorageStore, entity.slug()));
    });

    let load = move || {
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::fetch_all(entity).await {
                Ok(docs) => {
                    log::debug!("{}: loaded {} records", entity, docs.len());
                    match Catalogue::new(docs) {
                        Ok(c) => set_catalogue.set(c),
                        Err(e) => set_error.set(Some(e.to_string())),
                    }
                }
                Err(e) => {
                    log::error!("{}: {}", entity, e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load();
    });

    let result = Memo::new(move |_| {
        let q = query.get();
        schema.with_value(|s| catalogue.with(|c| c.query_documents(s, &q)))
    });

    let visible_columns = move || {
        let prefs = prefs.get();
        schema.with_value(|s| {
            s.columns
                .iter()
                .filter(|c| prefs.is_column_visible(&c.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let set_search = move |text: String| {
        query.update(|q| {
            q.search = text;
            q.page.page = 0;
        });
    };

    let toggle_filter = move |facet: String, value: String| {
        query.update(|q| {
            q.filters.toggle(&facet, &value);
            q.page.page = 0;
        });
    };

    let sort_by = move |field: String| {
        query.update(|q| q.sort = Some(next_sort(q.sort.as_ref(), &field)));
    };

    let filter_tags = move || {
        let selected: Vec<(String, String)> = query.with(|q| {
            q.filters
                .iter()
                .flat_map(|(facet, values)| values.iter().map(move |v| (facet.to_string(), v.clone())))
                .collect()
        });
        selected
            .into_iter()
            .map(|(facet, value)| {
                let facet_label = schema
                    .with_value(|s| s.facet(&facet).map(|d| d.label.clone()))
                    .unwrap_or_else(|| facet.clone());
                let label = format!("{}: {}", facet_label, value);
                view! {
                    <FilterTag
                        label=label
                        on_remove=Callback::new(move |_| toggle_filter(facet.clone(), value.clone()))
                    />
                }
            })
            .collect_view()
    };

    let facet_selects = move || {
        result
            .with(|r| r.facets.clone())
            .into_iter()
            .map(|group| {
                let selected_facet = group.id.clone();
                let toggled_facet = group.id.clone();
                view! {
                    <FacetSelect
                        group=group
                        is_selected=Callback::new(move |value: String| {
                            query.with(|q| q.filters.is_selected(&selected_facet, &value))
                        })
                        on_toggle=Callback::new(move |value: String| {
                            toggle_filter(toggled_facet.clone(), value)
                        })
                    />
                }
            })
            .collect_view()
    };

    let table_view = move || {
        let columns = visible_columns();
        let search = query.with(|q| q.search.clone());
        let sort = query.with(|q| q.sort.clone());
        let items = result.with(|r| r.items.clone());

        view! {
            <table class="catalogue-table">
                <thead>
                    <tr>
                        {columns
                            .iter()
                            .map(|column| {
                                let field = column.id.clone();
                                let indicator = get_sort_indicator(sort.as_ref(), &column.id);
                                view! {
                                    <th class="resizable" on:click=move |_| sort_by(field.clone())>
                                        {column.label.clone()}
                                        <span class="sort-indicator">{indicator}</span>
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {items
                        .iter()
                        .map(|doc| {
                            view! {
                                <tr>
                                    {columns
                                        .iter()
                                        .map(|column| view! { <td>{render_cell(column, doc, &search)}</td> })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any()
    };

    let grid_view = move || {
        let columns = visible_columns();
        let search = query.with(|q| q.search.clone());
        let items = result.with(|r| r.items.clone());

        view! {
            <div class="catalogue-grid">
                {items
                    .iter()
                    .map(|doc| {
                        let (title, details): (Vec<&FieldDescriptor>, Vec<&FieldDescriptor>) =
                            columns.iter().partition(|c| c.id == "name");
                        view! {
                            <div class="catalogue-card">
                                <div class="catalogue-card__title">
                                    {title.first().map(|c| render_cell(c, doc, &search))}
                                </div>
                                <dl class="catalogue-card__fields">
                                    {details
                                        .into_iter()
                                        .map(|column| {
                                            view! {
                                                <dt>{column.label.clone()}</dt>
                                                <dd>{render_cell(column, doc, &search)}</dd>
                                            }
                                        })
                                        .collect_view()}
                                </dl>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    let column_chooser = move || {
        schema.with_value(|s| s.columns.clone())
            .into_iter()
            .map(|column| {
                let checked_id = column.id.clone();
                let toggled_id = column.id.clone();
                view! {
                    <label class="column-chooser__option">
                        <input
                            type="checkbox"
                            prop:checked=move || prefs.with(|p| p.is_column_visible(&checked_id))
                            on:change=move |_| prefs.update(|p| p.toggle_column(&toggled_id))
                        />
                        <span>{column.label}</span>
                    </label>
                }
            })
            .collect_view()
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-header__title">{entity.title()}</h1>
                <span class="page-header__count">
                    {move || result.with(|r| format!("{} of {}", r.total_count, r.unfiltered_count))}
                </span>
                <div class="page-header__actions">
                    <SearchInput
                        value=Signal::derive(move || query.with(|q| q.search.clone()))
                        on_change=Callback::new(set_search)
                    />
                    <button
                        class="button button--ghost"
                        title="Toggle table / grid"
                        on:click=move |_| prefs.update(|p| p.view_mode = p.view_mode.toggled())
                    >
                        {move || match prefs.with(|p| p.view_mode) {
                            ViewMode::Table => icon("grid"),
                            ViewMode::Grid => icon("table"),
                        }}
                    </button>
                    <button
                        class="button button--ghost"
                        title="Columns"
                        on:click=move |_| columns_open.update(|o| *o = !*o)
                    >
                        {icon("columns")}
                    </button>
                    <a
                        class="button button--ghost"
                        title="Export CSV"
                        href=move || api::export_url(entity, &query.get())
                    >
                        {icon("download")}
                    </a>
                </div>
            </div>

            <Show when=move || columns_open.get()>
                <div class="column-chooser">{column_chooser}</div>
            </Show>

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=Signal::derive(move || query.with(|q| q.filters.active_count()))
                on_clear=Callback::new(move |_| query.update(|q| {
                    q.filters.clear();
                    q.page.page = 0;
                }))
                pagination_controls=move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || result.with(|r| r.page))
                        total_pages=Signal::derive(move || result.with(|r| r.total_pages))
                        total_count=Signal::derive(move || result.with(|r| r.total_count))
                        page_size=Signal::derive(move || result.with(|r| r.page_size))
                        on_page_change=Callback::new(move |page: usize| query.update(|q| q.page.page = page))
                        on_page_size_change=Callback::new(move |size: usize| {
                            query.update(|q| q.page = PageRequest::new(0, size))
                        })
                    />
                }
                filter_tags=filter_tags
            >
                {facet_selects}
            </FilterPanel>

            {move || error.get().map(|e| view! { <div class="error-box">{e}</div> })}

            {move || {
                if loading.get() {
                    view! { <div class="loading">"Loading..."</div> }.into_any()
                } else if result.with(|r| r.items.is_empty()) {
                    view! { <div class="empty-state">"Nothing matches the current search and filters."</div> }.into_any()
                } else {
                    match prefs.with(|p| p.view_mode) {
                        ViewMode::Table => table_view(),
                        ViewMode::Grid => grid_view(),
                    }
                }
            }}
        </div>
    }
}
