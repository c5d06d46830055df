use yew::prelude::*;

use crate::model::Mode;

#[derive(Properties, PartialEq, Clone)]
pub struct MenuViewProps {
    pub choose: Callback<Mode>,
}

#[function_component(MenuView)]
pub fn menu_view(props: &MenuViewProps) -> Html {
    let button_style = "background:#1E90FF; color:#fff; border:none; padding:16px 32px; border-radius:12px; margin:10px 0; font-size:18px; font-weight:bold; min-width:260px;";
    let groups_cb = {
        let cb = props.choose.clone();
        Callback::from(move |_| cb.emit(Mode::GroupSplit))
    };
    let pick_cb = {
        let cb = props.choose.clone();
        Callback::from(move |_| cb.emit(Mode::SinglePick))
    };
    html! {
        <div style="position:fixed; inset:0; background:#000; display:flex; flex-direction:column; justify-content:center; align-items:center;">
            <h1 style="font-size:32px; font-weight:bold; color:#fff; margin:0 0 40px 0;">{"Finger Dice"}</h1>
            <button style={button_style} onclick={groups_cb}>{"Split into Groups"}</button>
            <button style={button_style} onclick={pick_cb}>{"Pick One Person"}</button>
        </div>
    }
}
