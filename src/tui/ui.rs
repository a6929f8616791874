use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar, TypingIndicator};
use crate::tui::theme::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    let palette = Palette::for_preference(app.theme);
    frame.render_widget(Block::new().style(palette.base()), frame.area());

    let input_height = tui.input_box.calculate_height(frame.area().width);

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(input_height)]);
    let [title_area, main_area, indicator_area, input_area] = layout.areas(frame.area());

    // Messages first: the title bar needs this frame's unseen-content flag
    MessageList::new(&mut tui.message_list, &app.view, palette).render(frame, main_area);

    TitleBar::new(
        app.endpoint_name().to_string(),
        app.status_message.clone(),
        app.theme,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    TypingIndicator::new(app.is_sending(), frame_index, palette).render(frame, indicator_area);

    tui.input_box.locked = app.is_sending();
    tui.input_box.palette = palette;
    tui.input_box.render(frame, input_area);
}
