use super::{menu_view::MenuView, touch_view::TouchView};
use crate::model::Mode;
use crate::util::load_config;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Menu,
    Touch(Mode),
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Menu);
    // Read once per app load; a session never sees its config change.
    let config = use_memo((), |_| load_config());

    let choose = {
        let view = view.clone();
        Callback::from(move |mode: Mode| {
            tracing::info!(%mode, "mode chosen");
            view.set(View::Touch(mode));
        })
    };
    let to_menu = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Menu))
    };

    match *view {
        View::Menu => html! { <MenuView choose={choose} /> },
        // Keyed by mode so switching modes always mounts a fresh session.
        View::Touch(mode) => html! {
            <TouchView key={mode.to_string()} mode={mode} config={config.clone()} to_menu={to_menu} />
        },
    }
}
