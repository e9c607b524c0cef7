//! Landing page — the per-frame element tree.
//!
//! Logo on top, then the project cards laid out either through the grid
//! helper or as one horizontally scrolling row.

use crate::config::LayoutStrategy;
use crate::core::element::{
    AlignX, AlignY, ElementDecl, ElementId, LayoutDirection, Padding, Sizing, TextConfig, UserData,
};
use crate::core::layout::Ui;
use crate::core::render::RenderCommandArray;

use super::state::{AppContext, FontSet, ProjectCard};

pub const ROOT_ID: &str = "Root";
pub const ROW_ID: &str = "ProjectRow";

const CARD_WIDTH: f32 = 400.0;
const CARD_HEIGHT: f32 = 420.0;
const ROW_GAP: f32 = 30.0;

/// Name of the "Explore" button on a project's card.
pub fn button_id(title: &str) -> ElementId {
    ElementId::named(&format!("Explore:{title}"))
}

/// Build the whole page for one frame.
pub fn render(ui: &mut Ui, ctx: &mut AppContext, dt: f32) -> RenderCommandArray {
    tracing::trace!(dt, frame = ui.frame_count(), "render page");
    let theme = *ui.theme();
    let container = ctx
        .grid
        .as_ref()
        .map(|g| g.config().container.clone())
        .unwrap_or_else(|| "GridContainer".to_string());

    ui.begin_layout();
    ui.element(
        ElementDecl::new()
            .id(ROOT_ID)
            .size(Sizing::grow(), Sizing::grow())
            .padding(Padding::all(40.0))
            .direction(LayoutDirection::TopToBottom)
            .align(AlignX::Center, AlignY::Top)
            .scroll(false, true)
            .background(theme.background),
        |ui| {
            ui.element(
                ElementDecl::new()
                    .size(Sizing::grow(), Sizing::Fixed(200.0))
                    .align(AlignX::Center, AlignY::Center),
                |ui| {
                    ui.element(
                        ElementDecl::new()
                            .fixed(180.0, 180.0)
                            .image(ctx.logo.handle, ctx.logo.dimensions),
                        |_| {},
                    );
                },
            );

            ui.element(
                ElementDecl::new()
                    .id(&container)
                    .size(Sizing::grow(), Sizing::grow())
                    .align(AlignX::Center, AlignY::Top),
                |ui| match (ctx.layout, ctx.grid.is_some()) {
                    (LayoutStrategy::Grid, true) => render_grid(ui, ctx),
                    _ => render_row(ui, ctx),
                },
            );
        },
    );
    ui.end_layout()
}

fn render_grid(ui: &mut Ui, ctx: &mut AppContext) {
    let AppContext { grid, cards, fonts, .. } = ctx;
    let Some(grid) = grid.as_mut() else {
        return;
    };
    grid.begin(ui);
    for i in 0..cards.len() {
        grid.render_item(ui, i, |ui, key| {
            if let Some(card) = cards.get(key) {
                render_project_card(ui, card, *fonts);
            }
        });
    }
    grid.end(ui);
}

fn render_row(ui: &mut Ui, ctx: &AppContext) {
    ui.element(
        ElementDecl::new()
            .id(ROW_ID)
            .size(Sizing::grow(), Sizing::fit())
            .gap(ROW_GAP)
            .scroll(true, false),
        |ui| {
            for card in &ctx.cards {
                render_project_card(ui, card, ctx.fonts);
            }
        },
    );
}

/// One project card: thumbnail, title, description and an "Explore"
/// button linking to the project.
pub fn render_project_card(ui: &mut Ui, card: &ProjectCard, fonts: FontSet) {
    let theme = *ui.theme();
    let project = card.project;

    ui.element(
        ElementDecl::new()
            .fixed(CARD_WIDTH, CARD_HEIGHT)
            .padding(Padding::all(25.0))
            .gap(20.0)
            .direction(LayoutDirection::TopToBottom)
            .background(theme.secondary)
            .corner_radius(12.0)
            .border(theme.primary, 2.0),
        |ui| {
            ui.element(
                ElementDecl::new()
                    .fixed(350.0, 140.0)
                    .image(card.image.handle, card.image.dimensions),
                |_| {},
            );

            ui.text(
                project.title,
                TextConfig { color: theme.primary, font_size: 28, font_id: fonts.title },
            );
            ui.text(
                project.description,
                TextConfig { color: theme.text, font_size: 16, font_id: fonts.body },
            );

            let button = button_id(project.title);
            let background = if ui.is_hovered(button) {
                theme.primary_hover
            } else {
                theme.primary
            };
            let decl = ElementDecl::new()
                .element_id(button)
                .fixed(150.0, 45.0)
                .align(AlignX::Center, AlignY::Center)
                .background(background)
                .corner_radius(8.0)
                .user_data(UserData {
                    cursor_pointer: true,
                    link: Some(project.link.to_string()),
                });
            ui.element(decl, |ui| {
                ui.text(
                    "Explore",
                    TextConfig { color: theme.secondary, font_size: 18, font_id: fonts.body },
                );
            });
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LoadedImage;
    use crate::core::element::{Dimensions, FontId, ImageHandle};
    use crate::core::grid::{Grid, GridConfig};
    use crate::core::layout::CellMetrics;
    use crate::core::project::PROJECTS;
    use crate::core::render::{Point, RenderCommand};
    use crate::core::theme::Theme;

    fn context(layout: LayoutStrategy) -> AppContext {
        let cards = PROJECTS
            .iter()
            .enumerate()
            .map(|(i, project)| ProjectCard {
                project,
                image: LoadedImage {
                    handle: ImageHandle(i as u32 + 1),
                    dimensions: Dimensions::new(700.0, 280.0),
                },
            })
            .collect::<Vec<_>>();
        let grid = (layout == LayoutStrategy::Grid).then(|| {
            let mut grid = Grid::new(GridConfig::default());
            for i in 0..cards.len() {
                grid.add_item(0.0, 0.0, i);
            }
            grid
        });
        AppContext {
            fonts: FontSet { title: FontId(0), body: FontId(1) },
            logo: LoadedImage { handle: ImageHandle(0), dimensions: Dimensions::new(512.0, 512.0) },
            cards,
            grid,
            layout,
        }
    }

    fn tall_ui() -> Ui {
        Ui::new(Dimensions::new(1440.0, 2400.0), CellMetrics::default(), Theme::naox())
    }

    fn settle(ui: &mut Ui, ctx: &mut AppContext) -> RenderCommandArray {
        render(ui, ctx, 0.0);
        render(ui, ctx, 0.016)
    }

    #[test]
    fn grid_page_shows_every_card_with_its_link() {
        let mut ui = tall_ui();
        let mut ctx = context(LayoutStrategy::Grid);
        let out = settle(&mut ui, &mut ctx);

        let links: Vec<&str> = out
            .hit_targets
            .iter()
            .filter_map(|t| t.user_data.link.as_deref())
            .collect();
        let expected: Vec<&str> = PROJECTS.iter().map(|p| p.link).collect();
        assert_eq!(links, expected);
        assert!(out.hit_targets.iter().all(|t| t.user_data.cursor_pointer));
        assert_eq!(out.texts().filter(|t| *t == "Explore").count(), 6);
        assert_eq!(ctx.grid.as_ref().and_then(|g| g.placement()).map(|p| p.columns), Some(3));
    }

    #[test]
    fn logo_and_thumbnails_are_drawn() {
        let mut ui = tall_ui();
        let mut ctx = context(LayoutStrategy::Grid);
        let out = settle(&mut ui, &mut ctx);
        let images: Vec<u32> = out
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Image { image, .. } => Some(image.0),
                _ => None,
            })
            .collect();
        assert_eq!(images, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn titles_use_the_title_font() {
        let mut ui = tall_ui();
        let mut ctx = context(LayoutStrategy::Grid);
        let out = settle(&mut ui, &mut ctx);
        let config = out
            .iter()
            .find_map(|c| match c {
                RenderCommand::Text { text, config, .. } if text == "Inner Breeze" => Some(*config),
                _ => None,
            })
            .expect("title line");
        assert_eq!(config.font_id, FontId(0));
        assert_eq!(config.font_size, 28);
        assert_eq!(config.color, Theme::naox().primary);
    }

    #[test]
    fn hovered_button_switches_colour() {
        let mut ui = tall_ui();
        let mut ctx = context(LayoutStrategy::Grid);
        settle(&mut ui, &mut ctx);

        let button = button_id("Quest");
        let bounds = ui.element_bounds(button).expect("button laid out");
        ui.set_pointer(Some(Point::new(bounds.x + 5.0, bounds.y + 5.0)));
        let out = render(&mut ui, &mut ctx, 0.016);

        let color_of = |id: ElementId| {
            out.iter().find_map(|c| match c {
                RenderCommand::Rectangle { id: rid, color, .. } if *rid == id => Some(*color),
                _ => None,
            })
        };
        let theme = Theme::naox();
        assert_eq!(color_of(button), Some(theme.primary_hover));
        assert_eq!(color_of(button_id("Carousel")), Some(theme.primary));
    }

    #[test]
    fn click_on_button_yields_project_link() {
        let mut ui = tall_ui();
        let mut ctx = context(LayoutStrategy::Grid);
        settle(&mut ui, &mut ctx);

        let bounds = ui.element_bounds(button_id("Lyra")).expect("button laid out");
        let p = Point::new(bounds.x + 10.0, bounds.y + 10.0);
        ui.press(p);
        let data = ui.release(p).expect("click");
        assert_eq!(data.link.as_deref(), Some("https://lyra.xyz"));
    }

    #[test]
    fn row_layout_keeps_cards_on_one_line_and_scrolls() {
        let mut ui = Ui::new(Dimensions::new(1440.0, 900.0), CellMetrics::default(), Theme::naox());
        let mut ctx = context(LayoutStrategy::Row);
        settle(&mut ui, &mut ctx);

        let ys: Vec<f32> = PROJECTS
            .iter()
            .filter_map(|p| ui.element_bounds(button_id(p.title)).map(|b| b.y))
            .collect();
        assert_eq!(ys.len(), 6);
        assert!(ys.iter().all(|y| *y == ys[0]));

        assert!(ui.scroll_by(None, Point::new(500.0, 0.0)));
        assert_eq!(ui.scroll_offset(ElementId::named(ROW_ID)).x, 500.0);
    }

    #[test]
    fn tab_reaches_every_project_below_the_fold() {
        let mut ui = Ui::new(Dimensions::new(1440.0, 896.0), CellMetrics::default(), Theme::naox());
        let mut ctx = context(LayoutStrategy::Grid);
        let out = settle(&mut ui, &mut ctx);
        assert!(out.hit_targets.len() < PROJECTS.len());

        let mut links = Vec::new();
        for _ in 0..PROJECTS.len() {
            ui.focus_next();
            render(&mut ui, &mut ctx, 0.016);
            links.extend(ui.activate().and_then(|d| d.link));
        }
        let expected: Vec<String> = PROJECTS.iter().map(|p| p.link.to_string()).collect();
        assert_eq!(links, expected);

        let rocks = ui.element_bounds(button_id("Rocks")).expect("button laid out");
        assert!(rocks.y >= 0.0 && rocks.bottom() <= 896.0);
        assert!(ui.scroll_offset(ElementId::named(ROOT_ID)).y > 0.0);
    }

    #[test]
    fn page_scrolls_vertically_when_cards_overflow() {
        let mut ui = Ui::new(Dimensions::new(1440.0, 900.0), CellMetrics::default(), Theme::naox());
        let mut ctx = context(LayoutStrategy::Grid);
        settle(&mut ui, &mut ctx);
        assert!(ui.scroll_by(None, Point::new(0.0, 300.0)));
        assert_eq!(ui.scroll_offset(ElementId::named(ROOT_ID)).y, 300.0);
    }
}
