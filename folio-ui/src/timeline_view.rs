#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::{
    Debouncer, DrawInstruction, DrawKind, FolioError, FrameCoalescer, LabelRole, MonthFocus,
    Side, Timeline, TimelineConfig, TimelineItem, ViewportState, ViewportTracker, WheelDelta,
    ZoomController, ZoomLevel,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, Event, WheelEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimelineViewProps {
    pub items: Vec<TimelineItem>,
    pub config: TimelineConfig,
    pub on_select: Callback<String>,
    pub on_focus: Callback<MonthFocus>,
}

/// Mutable state shared by the DOM listeners and scheduled callbacks.
struct Runtime {
    timeline: Rc<Timeline>,
    zoom: ZoomController,
    tracker: ViewportTracker,
    frames: FrameCoalescer,
    frame: Option<AnimationFrame>,
    resize: Debouncer,
    resize_timer: Option<Timeout>,
    correction_frame: Option<AnimationFrame>,
}

impl Runtime {
    fn new(timeline: Rc<Timeline>) -> Self {
        let config = timeline.config().clone();
        Self {
            zoom: ZoomController::new(&config),
            tracker: ViewportTracker::new(),
            frames: FrameCoalescer::new(),
            frame: None,
            resize: Debouncer::new(config.resize_debounce_ms),
            resize_timer: None,
            correction_frame: None,
            timeline,
        }
    }

    /// Drop every pending callback so nothing runs against a stale DOM.
    fn cancel_pending(&mut self) {
        self.frame = None;
        self.frames.cancel();
        self.resize_timer = None;
        self.resize.cancel();
        self.correction_frame = None;
        self.zoom.cancel_correction();
    }
}

fn measure(element: &Element) -> ViewportState {
    ViewportState::new(element.scroll_left() as f64, element.client_width() as f64)
}

/// Read the container, update the tracker and publish the new viewport.
fn refresh_viewport(
    runtime: &Rc<RefCell<Runtime>>,
    element: &Element,
    viewport: &UseStateHandle<ViewportState>,
) {
    let state = measure(element);
    if !state.is_ready() {
        return;
    }
    {
        let mut guard = runtime.borrow_mut();
        let rt = &mut *guard;
        rt.tracker.update(&rt.timeline, rt.zoom.level(), &state);
    }
    viewport.set(state);
}

fn schedule_frame(
    runtime: &Rc<RefCell<Runtime>>,
    element: &Element,
    viewport: &UseStateHandle<ViewportState>,
) {
    if !runtime.borrow_mut().frames.request() {
        return;
    }
    let (rt, el, vp) = (Rc::clone(runtime), element.clone(), viewport.clone());
    let handle = request_animation_frame(move |_| {
        {
            let mut guard = rt.borrow_mut();
            guard.frame.take();
            guard.frames.fire();
        }
        refresh_viewport(&rt, &el, &vp);
    });
    runtime.borrow_mut().frame = Some(handle);
}

fn schedule_resize(
    runtime: &Rc<RefCell<Runtime>>,
    element: &Element,
    viewport: &UseStateHandle<ViewportState>,
) {
    let (token, delay) = {
        let mut guard = runtime.borrow_mut();
        (guard.resize.trigger(), guard.resize.delay_ms())
    };
    let (rt, el, vp) = (Rc::clone(runtime), element.clone(), viewport.clone());
    let timer = Timeout::new(delay, move || {
        let ready = {
            let mut guard = rt.borrow_mut();
            guard.resize_timer.take();
            guard.resize.fire(token)
        };
        if ready {
            refresh_viewport(&rt, &el, &vp);
        }
    });
    // Replacing the previous timer cancels it.
    runtime.borrow_mut().resize_timer = Some(timer);
}

/// Wait out the deferred paint cycles, then restore the anchor under the
/// viewport center.
fn drive_correction(
    runtime: &Rc<RefCell<Runtime>>,
    element: &Element,
    viewport: &UseStateHandle<ViewportState>,
) {
    let (rt, el, vp) = (Rc::clone(runtime), element.clone(), viewport.clone());
    let handle = request_animation_frame(move |_| {
        let (offset, pending) = {
            let mut guard = rt.borrow_mut();
            guard.correction_frame.take();
            let offset = guard.zoom.on_frame(el.client_width() as f64);
            (offset, guard.zoom.has_pending_correction())
        };
        match offset {
            Some(offset) => {
                el.scroll_to_with_x_and_y(offset, 0.0);
                refresh_viewport(&rt, &el, &vp);
            }
            None if pending => drive_correction(&rt, &el, &vp),
            None => {}
        }
    });
    runtime.borrow_mut().correction_frame = Some(handle);
}

#[function_component(TimelineView)]
pub fn timeline_view(props: &TimelineViewProps) -> Html {
    let timeline = use_memo((props.items.clone(), props.config.clone()), |(items, config)| {
        Timeline::new(items.clone(), config.clone())
    });
    let container = use_node_ref();
    let zoom = use_state(ZoomLevel::default);
    let viewport = use_state(ViewportState::default);
    let hovered = use_state(|| None::<String>);
    let runtime = use_mut_ref(|| Runtime::new(Rc::clone(&timeline)));

    {
        let runtime = runtime.clone();
        let zoom = zoom.clone();
        use_effect_with(Rc::clone(&timeline), move |timeline| {
            let mut rt = runtime.borrow_mut();
            rt.timeline = Rc::clone(timeline);
            rt.zoom = ZoomController::new(timeline.config());
            zoom.set(rt.zoom.level());
            || ()
        });
    }

    {
        let runtime = runtime.clone();
        let container = container.clone();
        let viewport = viewport.clone();
        let zoom = zoom.clone();
        let on_focus = props.on_focus.clone();
        use_effect_with((), move |_| {
            runtime
                .borrow_mut()
                .tracker
                .set_observer(move |focus| on_focus.emit(focus.clone()));

            let mut listeners = Vec::new();
            if let Some(element) = container.cast::<Element>() {
                refresh_viewport(&runtime, &element, &viewport);

                let (rt, el, vp) = (runtime.clone(), element.clone(), viewport.clone());
                listeners.push(EventListener::new(&element, "scroll", move |_| {
                    schedule_frame(&rt, &el, &vp);
                }));

                let (rt, el, vp) = (runtime.clone(), element.clone(), viewport.clone());
                listeners.push(EventListener::new_with_options(
                    &element,
                    "wheel",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| {
                        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                            return;
                        };
                        let delta = WheelDelta::new(wheel.delta_x(), wheel.delta_y());
                        if !delta.is_zoom_gesture() {
                            return;
                        }
                        event.prevent_default();

                        let state = measure(&el);
                        let change = rt.borrow_mut().zoom.on_wheel(delta, &state);
                        if let Some(change) = change {
                            zoom.set(change.level);
                            drive_correction(&rt, &el, &vp);
                        }
                    },
                ));

                if let Some(window) = web_sys::window() {
                    let (rt, el, vp) = (runtime.clone(), element.clone(), viewport.clone());
                    listeners.push(EventListener::new(&window, "resize", move |_| {
                        schedule_resize(&rt, &el, &vp);
                    }));
                }
            } else {
                console::warn_1(&"timeline container not mounted".into());
            }

            move || {
                drop(listeners);
                runtime.borrow_mut().cancel_pending();
            }
        });
    }

    let layout = match timeline.layout(*zoom, &viewport) {
        Ok(layout) => Some(layout),
        Err(FolioError::ViewportNotReady) => None,
        Err(err) => {
            console::error_1(&err.to_string().into());
            None
        }
    };

    let total_width = timeline.total_width(*zoom, viewport.viewport_width);
    let config = timeline.config();
    let axis_style = format!(
        "left: {}px; width: {}px",
        config.margin_left,
        config.track_width(total_width)
    );

    let on_hover = {
        let hovered = hovered.clone();
        Callback::from(move |id: Option<String>| hovered.set(id))
    };

    let mut seen = HashMap::new();

    html! {
        <div class="folio-timeline" ref={container}>
            <div class="folio-track" style={format!("width: {total_width}px")}>
                if !timeline.items().is_empty() {
                    <div class="folio-axis" style={axis_style} />
                }
                {
                    for layout
                        .iter()
                        .flat_map(|layout| layout.instructions.iter())
                        .map(|ins| {
                            let key = unique_key(&mut seen, instruction_key(ins));
                            render_instruction(ins, key, hovered.as_deref(), &props.on_select, &on_hover)
                        })
                }
            </div>
        </div>
    }
}

fn instruction_key(ins: &DrawInstruction) -> String {
    match &ins.kind {
        DrawKind::Gridline { date, .. } => format!("grid-{date}"),
        DrawKind::ItemMarker { id, .. } => format!("item-{id}"),
        DrawKind::Label { role, date, .. } => format!("label-{role:?}-{date}"),
    }
}

/// Items sharing a date produce identical date labels.
fn unique_key(seen: &mut HashMap<String, usize>, key: String) -> String {
    let count = seen.entry(key.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        key
    } else {
        format!("{key}-{count}")
    }
}

fn render_instruction(
    ins: &DrawInstruction,
    key: String,
    hovered: Option<&str>,
    on_select: &Callback<String>,
    on_hover: &Callback<Option<String>>,
) -> Html {
    let left = format!("left: {:.2}px", ins.x);
    let centered = ins.emphasized.then_some("is-centered");

    match &ins.kind {
        DrawKind::Gridline { year_mark, .. } => html! {
            <div key={key} class={classes!("folio-gridline", year_mark.then_some("is-year"), centered)} style={left} />
        },
        DrawKind::Label { text, role, .. } => {
            let role_class = match role {
                LabelRole::Year => "is-year",
                LabelRole::Month => "is-month",
                LabelRole::ItemDate => "is-item-date",
            };
            html! {
                <div key={key} class={classes!("folio-label", role_class, centered)} style={left}>
                    { text.clone() }
                </div>
            }
        }
        DrawKind::ItemMarker {
            id,
            thumbnail,
            side,
            ..
        } => {
            let side = match side {
                Side::Above => "above",
                Side::Below => "below",
            };
            let is_hovered = hovered == Some(id.as_str());
            let onclick = {
                let on_select = on_select.clone();
                let id = id.clone();
                Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
            };
            let onmouseenter = {
                let on_hover = on_hover.clone();
                let id = id.clone();
                Callback::from(move |_: MouseEvent| on_hover.emit(Some(id.clone())))
            };
            let onmouseleave = {
                let on_hover = on_hover.clone();
                Callback::from(move |_: MouseEvent| on_hover.emit(None))
            };

            html! {
                <div key={key} class="folio-item" data-side={side} style={left}>
                    <div class="folio-item-guide" />
                    <button
                        type="button"
                        class={classes!("folio-thumb", is_hovered.then_some("is-hovered"), centered)}
                        aria-label={format!("Open project {id}")}
                        {onclick}
                        {onmouseenter}
                        {onmouseleave}
                    >
                        <img src={thumbnail.clone()} alt={format!("Project {id}")} />
                    </button>
                </div>
            }
        }
    }
}
