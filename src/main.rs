use finger_dice::components::App;
use finger_dice::util::init_logging;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    init_logging(LevelFilter::INFO);
    yew::Renderer::<App>::new().render();
}
