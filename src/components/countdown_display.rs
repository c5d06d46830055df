use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownDisplayProps {
    pub value: Option<u32>,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let Some(value) = props.value else {
        return html! {};
    };
    html! {<div style="position:absolute; top:60px; left:50%; transform:translateX(-50%); color:#fff; font-size:48px; font-weight:bold; pointer-events:none; font-variant-numeric:tabular-nums;">
        { value }
    </div>}
}
