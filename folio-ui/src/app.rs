#![cfg(target_arch = "wasm32")]

use folio_content::Portfolio;
use folio_core::{ModalController, MonthFocus, QueryState, TimelineConfig};
use gloo::events::EventListener;
use web_sys::console;
use yew::prelude::*;

use crate::browser::{current_search, BodyScrollLock, BrowserQuery};
use crate::modal_view::ProjectModal;
use crate::styles;
use crate::timeline_view::TimelineView;

#[derive(Properties, PartialEq)]
pub struct PortfolioAppProps {
    pub portfolio: Portfolio,
    pub config: TimelineConfig,
}

#[function_component(PortfolioApp)]
pub fn portfolio_app(props: &PortfolioAppProps) -> Html {
    use_effect_with((), |_| {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            if let Err(err) = styles::ensure_styles(&document) {
                console::error_1(&err);
            }
        }
        || ()
    });

    // Mirror of `location.search`; the selection itself is always re-derived
    // from it.
    let search = use_state(current_search);
    {
        let search = search.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "popstate", move |_| search.set(current_search()))
            });
            move || drop(listener)
        });
    }

    let focus = use_state_eq(|| None::<MonthFocus>);
    let controller = use_mut_ref(|| {
        ModalController::new(props.config.query_key.clone(), BodyScrollLock::new())
    });

    let query = QueryState::parse(&search);
    let selected = controller
        .borrow()
        .selected(&query, &props.portfolio.catalog)
        .cloned();

    {
        let controller = controller.clone();
        use_effect_with(selected.is_some(), move |open| {
            controller.borrow_mut().sync(*open);
            || ()
        });
    }

    let on_query_change = {
        let search = search.clone();
        Callback::from(move |next: String| search.set(next))
    };

    let on_select = {
        let controller = controller.clone();
        let on_query_change = on_query_change.clone();
        Callback::from(move |id: String| {
            let mut browser = BrowserQuery::new(on_query_change.clone());
            controller.borrow().open(&mut browser, &id);
        })
    };

    let on_close = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            let mut browser = BrowserQuery::new(on_query_change.clone());
            controller.borrow().close(&mut browser);
        })
    };

    let on_focus = {
        let focus = focus.clone();
        Callback::from(move |next: MonthFocus| focus.set(Some(next)))
    };

    let site = &props.portfolio.site;
    let focus_caption = focus.as_ref().map(describe_focus);

    html! {
        <div class="folio-page">
            <TimelineView
                items={props.portfolio.catalog.timeline_items()}
                config={props.config.clone()}
                {on_select}
                {on_focus}
            />
            <header class="folio-header">
                <h1>{ site.owner.clone() }</h1>
                <nav class="folio-links">
                    { for site.links.iter().map(|link| html! {
                        <a href={link.url.clone()} target="_blank" rel="noopener noreferrer" aria-label={link.label.clone()}>
                            { link.label.clone() }
                        </a>
                    }) }
                </nav>
                if let Some(caption) = focus_caption {
                    <div class="folio-focus" aria-live="polite">{ caption }</div>
                }
            </header>
            <div class="folio-fade is-left" />
            <div class="folio-fade is-right" />
            if let Some(project) = selected {
                <ProjectModal key={project.id.clone()} {project} {on_close} />
            }
        </div>
    }
}

fn describe_focus(focus: &MonthFocus) -> String {
    let month = chrono::Month::try_from(focus.month as u8)
        .map(|month| month.name().to_string())
        .unwrap_or_else(|_| format!("Month {}", focus.month));
    match focus.items.len() {
        0 => format!("{month} {}", focus.year),
        1 => format!("{month} {} · 1 project", focus.year),
        count => format!("{month} {} · {count} projects", focus.year),
    }
}
