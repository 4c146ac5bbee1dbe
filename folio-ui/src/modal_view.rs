#![cfg(target_arch = "wasm32")]

use folio_core::Project;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectModalProps {
    pub project: Project,
    pub on_close: Callback<()>,
}

#[function_component(ProjectModal)]
pub fn project_modal(props: &ProjectModalProps) -> Html {
    let project = &props.project;

    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window()
                .and_then(|window| window.document())
                .map(|document| {
                    EventListener::new(&document, "keydown", move |event| {
                        let escape = event
                            .dyn_ref::<KeyboardEvent>()
                            .map(|event| event.key() == "Escape")
                            .unwrap_or(false);
                        if escape {
                            on_close.emit(());
                        }
                    })
                });
            move || drop(listener)
        });
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |event: MouseEvent| {
            if event.target() == event.current_target() {
                on_close.emit(());
            }
        })
    };
    let on_close_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="folio-modal-backdrop" onclick={on_backdrop}>
            <div class="folio-modal">
                <button type="button" class="folio-modal-close" onclick={on_close_click} aria-label="Close modal">
                    <svg width="24" height="24" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                    </svg>
                </button>
                <article>
                    <header>
                        <span class="folio-modal-tag">{ project.discipline.label() }</span>
                        <h1 class="folio-modal-title">{ project.title.clone() }</h1>
                        <time class="folio-modal-date" datetime={project.date.to_string()}>
                            { project.date.format("%B %-d, %Y").to_string() }
                        </time>
                    </header>
                    <div class="folio-modal-hero">
                        <img src={project.thumbnail.clone()} alt={project.title.clone()} />
                    </div>
                    <div class="folio-modal-content">
                        { for project.content.paragraphs.iter().map(|text| html! { <p>{ text.clone() }</p> }) }
                        if !project.content.images.is_empty() || !project.content.videos.is_empty() {
                            <div class="folio-modal-media">
                                { for project.content.images.iter().map(|src| html! {
                                    <img src={src.clone()} alt={project.title.clone()} />
                                }) }
                                { for project.content.videos.iter().map(|src| html! {
                                    <video src={src.clone()} controls={true} />
                                }) }
                            </div>
                        }
                    </div>
                </article>
            </div>
        </div>
    }
}
