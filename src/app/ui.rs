//! UI rendering for the TUI

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        TableState, Wrap,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::{AppState, InputTarget, Mode};
use crate::columns::ColumnSet;
use crate::models::{
    BillingPeriod, FAQ, GenerationKind, PLANS, Role, SocialNetwork, StudioField, TOP_UP_PRESETS,
    source_totals,
};
use crate::pipeline::{ReadinessFlag, StatusMachine, count_by_status};
use crate::routes::Route;
use crate::theme::{Theme, ThemeColors};

/// Astra icon
const ICON: &str = "✨";

/// Spinner animation frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar + page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(chunks[0]);

    render_sidebar(frame, state, body[0]);
    render_page(frame, state, body[1]);
    render_status_bar(frame, state, chunks[1]);

    // Render modal dialogs
    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::ThemePicker => render_theme_picker(frame, state),
        Mode::Input(target) => render_input_popup(frame, state, target),
        Mode::Normal => {}
    }
}

fn page_block<'a>(colors: &ThemeColors, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(colors.text_primary())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus())
}

fn render_sidebar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let current = match &state.route {
        Route::PromptDetail(_) => Route::Prompts,
        other => other.clone(),
    };

    let mut items = Vec::new();
    let mut in_factory = false;
    for route in Route::menu() {
        if route.is_content_factory() && !in_factory {
            in_factory = true;
            items.push(ListItem::new(Line::from(Span::styled(
                " 🏭 Content factory",
                colors.text_muted().add_modifier(Modifier::BOLD),
            ))));
        }
        let indent = if route.is_content_factory() { "   " } else { " " };
        let active = route == current;
        let style = if active { colors.tab_active() } else { colors.tab() };
        let marker = if active { "●" } else { "○" };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{indent}{marker} "), style),
            Span::styled(route.title(), style),
        ])));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(format!(" {ICON} Astra Promt "))
            .title_style(colors.logo_style_primary()),
    );
    frame.render_widget(list, area);
}

fn render_page(frame: &mut Frame, state: &AppState, area: Rect) {
    match &state.route {
        Route::Home => render_home(frame, state, area),
        Route::Chat => render_chat(frame, state, area),
        Route::Photo => render_studio(frame, state, area, GenerationKind::Photo),
        Route::Video => render_studio(frame, state, area, GenerationKind::Video),
        Route::Prompts => render_prompts(frame, state, area),
        Route::PromptDetail(id) => render_prompt_detail(frame, state, area, id),
        Route::Assistants => render_assistants(frame, state, area),
        Route::Generations => render_generations(frame, state, area),
        Route::Training => render_training(frame, state, area),
        Route::Subscription => render_subscription(frame, state, area),
        Route::Profile => render_profile(frame, state, area),
        Route::Support => render_support(frame, state, area),
        Route::Sources => render_sources(frame, state, area),
        Route::Collection => render_collection(frame, state, area),
        Route::Check => render_check(frame, state, area),
        Route::BasePost => render_base_posts(frame, state, area),
        Route::Verification => render_verification(frame, state, area),
        Route::Publications => render_publications(frame, state, area),
        Route::PublicationEdit => render_adaptations(frame, state, area),
        Route::NotFound(path) => render_not_found(frame, state, area, path),
    }
}

/// Cut `text` to `width` display columns, ending with `…` when shortened
fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.width() <= width {
        return flat;
    }
    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn key_line<'a>(colors: &ThemeColors, key: &'a str, label: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key:<16} "), colors.key_hint()),
        Span::styled(label, colors.text()),
    ])
}

fn heading<'a>(colors: &ThemeColors, text: &'a str) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {text}"),
        colors.text_primary().add_modifier(Modifier::BOLD),
    ))
}

/// Filter summary shown in page titles
fn filter_label(state: &AppState, extra: &[String]) -> String {
    let mut parts: Vec<String> = extra.to_vec();
    if !state.search.is_empty() {
        parts.push(format!("\"{}\"", state.search));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" │ {}", parts.join(" · "))
    }
}

fn column_width(id: &str) -> Constraint {
    match id {
        "title" => Constraint::Fill(2),
        "summary" | "description" | "text" => Constraint::Fill(3),
        "date" | "format" | "status" | "network" => Constraint::Length(13),
        "credibility" => Constraint::Length(12),
        _ => Constraint::Length(20),
    }
}

/// Table over the visible columns of `columns`
fn render_column_table<T>(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
    title: String,
    columns: &ColumnSet,
    items: &[T],
    cell: impl Fn(&T, &str) -> (String, Style),
) {
    let colors = state.theme.colors();
    let visible: Vec<_> = columns.visible().collect();

    let header = Row::new(
        visible
            .iter()
            .map(|c| Cell::from(c.label).style(colors.text_secondary().add_modifier(Modifier::BOLD))),
    );

    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            Row::new(visible.iter().map(|c| {
                let (text, style) = cell(item, c.id);
                Cell::from(truncate(&text, 80)).style(style)
            }))
        })
        .collect();

    let hidden: Vec<_> = columns
        .all()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.visible)
        .map(|(i, c)| format!("{}:{}", i + 1, c.label))
        .collect();
    let footer = if hidden.is_empty() {
        " 1-9 toggle columns ".to_string()
    } else {
        format!(" hidden {} ", hidden.join(" "))
    };

    let table = Table::new(rows, visible.iter().map(|c| column_width(c.id)))
        .header(header)
        .block(page_block(&colors, title).title_bottom(Line::from(footer).right_aligned()))
        .row_highlight_style(colors.selected())
        .column_spacing(2);

    let mut table_state = TableState::default().with_selected(if items.is_empty() {
        None
    } else {
        Some(state.selected)
    });
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_list(frame: &mut Frame, state: &AppState, area: Rect, title: String, items: Vec<ListItem>) {
    let colors = state.theme.colors();
    let empty = items.is_empty();
    let items = if empty {
        vec![ListItem::new(Line::from(vec![
            Span::styled("  ℹ ", colors.text_info()),
            Span::styled("Nothing matches", colors.text_muted()),
        ]))]
    } else {
        items
    };

    let list = List::new(items)
        .block(page_block(&colors, title))
        .highlight_style(colors.selected());

    let mut list_state = ListState::default();
    list_state.select(if empty { None } else { Some(state.selected) });
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_home(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let (active_sources, collected) = source_totals(&state.sources);
    let new_items = count_by_status(&state.collection)
        .into_iter()
        .map(|(s, n)| format!("{}: {n}", s.as_str()))
        .collect::<Vec<_>>()
        .join("  ");
    let publications = count_by_status(&state.publications)
        .into_iter()
        .map(|(s, n)| format!("{}: {n}", s.as_str()))
        .collect::<Vec<_>>()
        .join("  ");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {ICON} Welcome to Astra Promt"),
            colors.logo_style_primary(),
        )),
        Line::from(Span::styled(
            "  Chat, generate and run your editorial pipeline from one place.",
            colors.text_dim(),
        )),
        Line::from(""),
        heading(&colors, "Content factory"),
        Line::from(Span::styled(
            format!("  📡 {active_sources} active sources, {collected} items collected"),
            colors.text(),
        )),
        Line::from(Span::styled(format!("  📥 Collection  {new_items}"), colors.text())),
        Line::from(Span::styled(format!("  📤 Publications  {publications}"), colors.text())),
        Line::from(""),
        heading(&colors, "Jump to"),
        key_line(&colors, "c", "AI chat"),
        key_line(&colors, "p", "Prompt catalog"),
        key_line(&colors, "f", "Content factory"),
        key_line(&colors, "a", "Assistants"),
        key_line(&colors, "s", "Support"),
    ];

    let paragraph = Paragraph::new(lines).block(page_block(&colors, " 🏠 Home "));
    frame.render_widget(paragraph, area);
}

fn render_chat(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let width = area.width.saturating_sub(6).max(10) as usize;

    let mut lines = Vec::new();
    if state.chat.messages().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Ask anything. Press ↵ to write a message.",
            colors.text_muted(),
        )));
    }
    for message in state.chat.messages() {
        let (who, style) = match message.role {
            Role::User => ("You", colors.text_secondary()),
            Role::Assistant => ("Assistant", colors.text_primary()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {who}"), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" · {}", message.time_display()), colors.text_muted()),
        ]));
        for paragraph in message.content.lines() {
            if paragraph.trim().is_empty() {
                lines.push(Line::from(""));
                continue;
            }
            for wrapped in textwrap::wrap(paragraph, width) {
                lines.push(Line::from(Span::styled(format!("   {wrapped}"), colors.text())));
            }
        }
        lines.push(Line::from(""));
    }
    if state.chat.is_waiting() {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        lines.push(Line::from(Span::styled(
            format!(" {} Assistant is typing...", SPINNER[frame_idx]),
            colors.text_muted(),
        )));
    }

    // Keep the newest messages in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height);

    let paragraph = Paragraph::new(lines)
        .block(
            page_block(&colors, " 💬 AI Chat ")
                .title_bottom(Line::from(" ↵ write │ x clear ").right_aligned()),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

fn render_studio(frame: &mut Frame, state: &AppState, area: Rect, kind: GenerationKind) {
    let colors = state.theme.colors();
    let (title, studio) = match kind {
        GenerationKind::Video => (" 🎬 Video generation ", &state.video_studio),
        _ => (" 🖼️ Photo generation ", &state.photo_studio),
    };

    let mut lines = vec![Line::from("")];
    for field in studio.fields() {
        let key = match field {
            StudioField::Model => 'm',
            StudioField::Resolution => 'r',
            StudioField::Orientation => 'o',
            StudioField::Duration => 'd',
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", field.label()), colors.text_secondary()),
            Span::styled(studio.value(*field).unwrap_or("-"), colors.text_primary()),
            Span::styled(format!("  ({key})"), colors.text_dim()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(heading(&colors, "Recent"));
    let now = Utc::now();
    for generation in state.generations.iter().filter(|g| g.kind == kind) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", kind.emoji()), colors.text()),
            Span::styled(generation.title.clone(), colors.text()),
            Span::styled(
                format!("  {}", relative_age(now, generation.created_at)),
                colors.text_muted(),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        page_block(&colors, title).title_bottom(Line::from(" ↵ describe │ m r o d settings ").right_aligned()),
    );
    frame.render_widget(paragraph, area);
}

fn relative_age(now: chrono::DateTime<Utc>, then: chrono::DateTime<Utc>) -> String {
    let age = now.signed_duration_since(then);
    if age.num_hours() < 1 {
        format!("{}m ago", age.num_minutes().max(0))
    } else if age.num_hours() < 24 {
        format!("{}h ago", age.num_hours())
    } else {
        format!("{}d ago", age.num_days())
    }
}

fn render_prompts(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let prompts = state.visible_prompts();

    let mut extra = Vec::new();
    if state.show_library {
        extra.push("library".to_string());
    } else {
        if let Some(model) = state.prompt_filter.model {
            extra.push(model.name().to_string());
        }
        if let Some(category) = &state.prompt_filter.category {
            extra.push(category.clone());
        }
    }

    let items = prompts
        .iter()
        .map(|p| {
            let heart = if state.catalog.is_liked(&p.id) { "♥" } else { "♡" };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {heart} "), colors.text_error()),
                    Span::styled(p.title.clone(), colors.text().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", p.model.name()), colors.text_info()),
                    Span::styled(format!("  #{}", p.tags.join(" #")), colors.text_muted()),
                ]),
                Line::from(Span::styled(
                    format!("   {}", truncate(&p.preview, usize::from(area.width.saturating_sub(8)))),
                    colors.text_dim(),
                )),
            ])
        })
        .collect();

    let title = format!(
        " 📚 {} ({}){} ",
        if state.show_library { "Library" } else { "Prompt catalog" },
        prompts.len(),
        filter_label(state, &extra)
    );
    render_list(frame, state, area, title, items);
}

fn render_prompt_detail(frame: &mut Frame, state: &AppState, area: Rect, id: &str) {
    let colors = state.theme.colors();
    let Some(prompt) = state.catalog.get(id) else {
        render_not_found(frame, state, area, &format!("/prompt/{id}"));
        return;
    };

    let liked = state.catalog.is_liked(id);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", prompt.title),
            colors.text_primary().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Model  ", colors.text_secondary()),
            Span::styled(prompt.model.name(), colors.text_info()),
            Span::styled("   Tags  ", colors.text_secondary()),
            Span::styled(prompt.tags.join(", "), colors.text_muted()),
        ]),
        Line::from(Span::styled(
            if liked { "  ♥ In your library" } else { "  ♡ Not in your library" },
            colors.text_error(),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", prompt.preview), colors.text())),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            page_block(&colors, " 📝 Prompt ")
                .title_bottom(Line::from(" l like │ Esc back ").right_aligned()),
        );
    frame.render_widget(paragraph, area);
}

fn render_assistants(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let assistants = state.visible_assistants();
    let items = assistants
        .iter()
        .map(|a| {
            let swatch = hex_color(&a.color).unwrap_or(colors.primary);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(" █ ", Style::default().fg(swatch)),
                    Span::styled(format!("{} {}", a.icon, a.name), colors.text().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("   {}", truncate(&a.description, usize::from(area.width.saturating_sub(8)))),
                    colors.text_dim(),
                )),
            ])
        })
        .collect();
    let title = format!(" 🤖 My assistants ({}){} ", assistants.len(), filter_label(state, &[]));
    render_list(frame, state, area, title, items);
}

fn render_generations(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let generations = state.visible_generations();
    let now = Utc::now();
    let items = generations
        .iter()
        .map(|g| {
            let mut spans = vec![
                Span::styled(format!(" {} ", g.kind.emoji()), colors.text()),
                Span::styled(g.title.clone(), colors.text()),
                Span::styled(format!("  {}", relative_age(now, g.created_at)), colors.text_muted()),
            ];
            if let Some(preview) = &g.preview {
                spans.push(Span::styled(format!("  {}", truncate(preview, 50)), colors.text_dim()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let extra: Vec<String> = state
        .generation_filter
        .kind
        .map(|k| k.label().to_string())
        .into_iter()
        .collect();
    let title = format!(" 🗂️ My generations ({}){} ", generations.len(), filter_label(state, &extra));
    render_list(frame, state, area, title, items);
}

fn render_training(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let courses = [
        ("Prompt engineering basics", "12 lessons", "Beginner"),
        ("Image generation masterclass", "8 lessons", "Intermediate"),
        ("Video with AI", "6 lessons", "Intermediate"),
        ("Building assistants", "10 lessons", "Advanced"),
    ];
    let mut lines = vec![Line::from("")];
    for (name, lessons, level) in courses {
        lines.push(Line::from(vec![
            Span::styled("  🎓 ", colors.text()),
            Span::styled(name, colors.text().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {lessons} · {level}"), colors.text_muted()),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).block(page_block(&colors, " 🎓 Training ")), area);
}

fn render_subscription(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let period = match state.billing_period {
        BillingPeriod::Monthly => "month",
        BillingPeriod::Yearly => "year",
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  💎 Balance ", colors.text_secondary()),
            Span::styled(format!("{} gems", state.gems), colors.text().add_modifier(Modifier::BOLD)),
            Span::styled("   Payment ", colors.text_secondary()),
            Span::styled(state.payment_method.label(), colors.text()),
        ]),
        Line::from(""),
    ];

    for plan in PLANS {
        let price = if plan.is_free() {
            "Free".to_string()
        } else {
            format!("{} ₽ / {period}", plan.price(state.billing_period))
        };
        let badge = if plan.popular { "  ★ popular" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", plan.name), colors.text_primary().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{price:<18}"), colors.text()),
            Span::styled(plan.description, colors.text_muted()),
            Span::styled(badge, colors.text_warning()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", plan.features.join(" · ")),
            colors.text_dim(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(heading(&colors, "Top-up presets"));
    let presets = TOP_UP_PRESETS
        .iter()
        .enumerate()
        .map(|(idx, (amount, gems))| format!("{} {amount} ₽ → {gems} 💎", idx + 1))
        .collect::<Vec<_>>()
        .join("   ");
    lines.push(Line::from(Span::styled(format!("  {presets}"), colors.text())));

    let paragraph = Paragraph::new(lines).block(
        page_block(&colors, " 💳 Subscription ")
            .title_bottom(Line::from(" b period │ m payment method │ 1-4 preset │ u custom top up ").right_aligned()),
    );
    frame.render_widget(paragraph, area);
}

fn render_profile(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  👤 Astra user", colors.text_primary().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(format!("  Generations      {}", state.generations.len()), colors.text())),
        Line::from(Span::styled(
            format!("  Liked prompts    {}", state.catalog.library().len()),
            colors.text(),
        )),
        Line::from(Span::styled(format!("  Assistants       {}", state.assistants.len()), colors.text())),
        Line::from(Span::styled(format!("  Gems             {}", state.gems), colors.text())),
        Line::from(Span::styled(format!("  Theme            {}", state.theme), colors.text())),
    ];
    frame.render_widget(Paragraph::new(lines).block(page_block(&colors, " 👤 Profile ")), area);
}

fn render_support(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(0)])
        .split(area);

    let mut lines = vec![Line::from("")];
    for (question, answer) in FAQ {
        lines.push(Line::from(Span::styled(
            format!("  ❓ {question}"),
            colors.text().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(format!("     {answer}"), colors.text_dim())));
    }
    let faq = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(page_block(&colors, " 🆘 FAQ "));
    frame.render_widget(faq, halves[0]);

    let items = state
        .tickets
        .iter()
        .map(|t| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" [{}] ", t.category.label()), colors.text_info()),
                Span::styled(t.subject.clone(), colors.text()),
                Span::styled(
                    format!("  {}", t.created_at.format("%Y-%m-%d %H:%M")),
                    colors.text_muted(),
                ),
            ]))
        })
        .collect();
    let title = format!(" 📨 Tickets ({}) │ n new ", state.tickets.len());
    render_list(frame, state, halves[1], title, items);
}

fn render_sources(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let sources = state.visible_sources();
    let (active, items_total) = source_totals(&state.sources);

    let items = sources
        .iter()
        .map(|s| {
            let (dot, dot_style) = if s.is_active {
                ("●", colors.text_success())
            } else {
                ("○", colors.text_muted())
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {dot} "), dot_style),
                Span::styled(format!("{} {:<24}", s.kind.emoji(), s.name), colors.text()),
                Span::styled(format!("{:<12}", s.kind.label()), colors.text_info()),
                Span::styled(format!("{:>6} items  ", s.items_count), colors.text()),
                Span::styled(s.last_sync_display(), colors.text_muted()),
                Span::styled(format!("  {}", s.url), colors.text_dim()),
            ]))
        })
        .collect();

    let title = format!(
        " 📡 Sources ({active} active, {items_total} items){} │ space toggle · n add · d delete ",
        filter_label(state, &[])
    );
    render_list(frame, state, area, title, items);
}

fn render_collection(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let items = state.visible_collection();
    let counts = count_by_status(&state.collection)
        .into_iter()
        .map(|(s, n)| format!("{} {n}", s.as_str()))
        .collect::<Vec<_>>()
        .join(" · ");

    let mut extra = Vec::new();
    if let Some(format) = state.collection_filter.format {
        extra.push(format.as_str().to_string());
    }
    if let Some(source_type) = state.collection_filter.source_type {
        extra.push(source_type.label().to_string());
    }
    let title = format!(" 📥 Collection ({counts}){} │ a approve · r reject · o open ", filter_label(state, &extra));

    render_column_table(frame, state, area, title, &state.collection_columns, &items, |item, col| {
        match col {
            "title" => (item.title.clone(), colors.text()),
            "source" => (
                format!("{} ({})", item.source, item.source_type.label()),
                colors.text_dim(),
            ),
            "format" => (format!("{} {}", item.format.emoji(), item.format.as_str()), colors.text()),
            "date" => (item.date.format("%Y-%m-%d").to_string(), colors.text_muted()),
            "summary" => (item.summary.clone(), colors.text_dim()),
            "status" => (item.status.as_str().to_string(), colors.status(item.status.as_str())),
            _ => (String::new(), colors.text()),
        }
    });
}

fn render_check(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let items = state.visible_checks();
    let extra: Vec<String> = state.check_filter.source.iter().cloned().collect();
    let title = format!(
        " 🔎 Credibility check ({}){} │ a approve · r reject ",
        items.len(),
        filter_label(state, &extra)
    );

    render_column_table(frame, state, area, title, &state.check_columns, &items, |item, col| {
        match col {
            "source" => (
                format!("{} {} · {}", item.source_icon, item.source, item.channel_name),
                colors.text_dim(),
            ),
            "title" => (item.title.clone(), colors.text()),
            "credibility" => (
                format!("{}%", item.credibility_score.value()),
                colors.credibility(item.credibility_score.level()),
            ),
            "description" => (item.description.clone(), colors.text_dim()),
            "status" => (item.status.as_str().to_string(), colors.status(item.status.as_str())),
            _ => (String::new(), colors.text()),
        }
    });
}

fn render_base_posts(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let posts = state.visible_base_posts();
    let items = posts
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {:<10}", p.status.as_str()), colors.status(p.status.as_str())),
                    Span::styled(p.title.clone(), colors.text().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", p.network_icons()), colors.text()),
                ]),
                Line::from(vec![
                    Span::styled(format!("   {} · ", p.model), colors.text_info()),
                    Span::styled(truncate(&p.text, usize::from(area.width.saturating_sub(20))), colors.text_dim()),
                ]),
            ])
        })
        .collect();
    let title = format!(
        " ✍️ Base posts ({}){} │ a approve · r reject · e verify ",
        posts.len(),
        filter_label(state, &[])
    );
    render_list(frame, state, area, title, items);
}

fn render_verification(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let post_lines = state.editing.as_ref().map_or_else(
        || {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No base post selected. Pick one on the Base posts page and press e.",
                    colors.text_muted(),
                )),
            ]
        },
        |post| {
            vec![
                Line::from(Span::styled(
                    format!(" {}", post.title),
                    colors.text_primary().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(" Model ", colors.text_secondary()),
                    Span::styled(post.model.clone(), colors.text_info()),
                    Span::styled("  Prompt ", colors.text_secondary()),
                    Span::styled(post.prompt.clone(), colors.text_dim()),
                ]),
                Line::from(""),
                Line::from(Span::styled(format!(" {}", post.text), colors.text())),
                Line::from(""),
                Line::from(Span::styled(format!(" {}", post.base_post), colors.text_dim())),
            ]
        },
    );
    let post = Paragraph::new(post_lines)
        .wrap(Wrap { trim: false })
        .block(page_block(&colors, " ✅ Verification & editing "));
    frame.render_widget(post, halves[0]);

    let settings = &state.editorial;
    let mut lines = vec![
        Line::from(""),
        key_line(&colors, "T  Tone", settings.tone.label()),
        key_line(&colors, "L  Length", settings.length.label()),
        key_line(&colors, "S  Style", settings.style.label()),
        Line::from(""),
        heading(&colors, "Networks"),
    ];
    for (key, network) in ["a", "b", "c", "d"].into_iter().zip(SocialNetwork::all()) {
        let selected = settings.is_selected(*network);
        lines.push(Line::from(vec![
            Span::styled(format!("  {key} "), colors.key_hint()),
            Span::styled(if selected { "[✓] " } else { "[ ] " }, colors.check(selected)),
            Span::styled(format!("{} {}", network.emoji(), network.name()), colors.network(*network)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  ↵ adapt for selected networks", colors.text_muted())));

    let panel = Paragraph::new(lines).block(page_block(&colors, " ⚙️ Settings "));
    frame.render_widget(panel, halves[1]);
}

fn render_publications(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let items = state.visible_publications();

    let mut extra = Vec::new();
    if let Some(status) = state.publication_filter.status {
        extra.push(status.as_str().to_string());
    }
    if let Some(network) = state.publication_filter.network {
        extra.push(network.name().to_string());
    }
    let title = format!(
        " 📤 Publications ({}){} │ p publish · c cancel · e adapt ",
        items.len(),
        filter_label(state, &extra)
    );

    render_column_table(frame, state, area, title, &state.publication_columns, &items, |item, col| {
        match col {
            "title" => (
                if item.title.is_empty() { "(untitled)".to_string() } else { item.title.clone() },
                colors.text(),
            ),
            "text" => (item.text.clone(), colors.text_dim()),
            "network" => (
                format!("{} {}", item.network.emoji(), item.network.name()),
                colors.network(item.network),
            ),
            "channel" => (item.channel.clone(), colors.text_dim()),
            "status" => (
                format!("{} {}", item.status.emoji(), item.status.as_str()),
                colors.status(item.status.as_str()),
            ),
            "publish_date" => (item.publish_date_display(), colors.text_muted()),
            _ => (String::new(), colors.text()),
        }
    });
}

fn render_adaptations(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items = state
        .board
        .posts()
        .iter()
        .map(|post| {
            let mut spans = vec![Span::styled(
                format!(" {} {:<10}", post.network.emoji(), post.network.name()),
                colors.network(post.network),
            )];
            for flag in ReadinessFlag::all() {
                let done = flag.get(post);
                spans.push(Span::styled(
                    format!(" {}{}", if done { "✓" } else { "✗" }, flag.label()),
                    colors.check(done),
                ));
            }
            let count_style = if post.exceeds_limit() { colors.text_error() } else { colors.text_muted() };
            spans.push(Span::styled(
                format!("  {}/{}", post.char_count(), post.max_length),
                count_style,
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let gate = if state.board.can_publish() {
        " ✅ ready to publish (p) ".to_string()
    } else {
        format!(" {}/{} ready ", state.board.ready_count(), state.board.posts().len())
    };
    let title = format!(" 📋 Publication & approval │{gate}");
    render_list(frame, state, halves[0], title, items);

    let preview_lines = state.board.posts().get(state.selected).map_or_else(Vec::new, |post| {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Image ", colors.text_secondary()),
                Span::styled(post.image_format.clone(), colors.text()),
            ]),
            Line::from(Span::styled(
                format!(" {}", if post.title.is_empty() { "(no title)" } else { post.title.as_str() }),
                colors.text_primary().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            post.content
                .lines()
                .map(|l| Line::from(Span::styled(format!(" {l}"), colors.text()))),
        );
        lines
    });
    let preview = Paragraph::new(preview_lines).wrap(Wrap { trim: false }).block(
        page_block(&colors, " 👁 Preview ")
            .title_bottom(Line::from(" x text · i image · v verified · e edit ").right_aligned()),
    );
    frame.render_widget(preview, halves[1]);
}

fn render_not_found(frame: &mut Frame, state: &AppState, area: Rect, path: &str) {
    let colors = state.theme.colors();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("404", colors.text_error().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(format!("No page at {path}"), colors.text_muted())),
        Line::from(""),
        Line::from(Span::styled("Press ↵ to go home", colors.text_dim())),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(page_block(&colors, " Not found "));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let waiting = if state.chat.is_waiting() {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let content = if state.status.is_empty() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(waiting, colors.text_secondary()),
            Span::styled(state.route.path(), colors.text_info()),
            Span::styled("  Tab", colors.key_hint()),
            Span::styled(": pages  ", colors.text_muted()),
            Span::styled("/", colors.key_hint()),
            Span::styled(": search  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("t", colors.key_hint()),
            Span::styled(": theme  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(waiting, colors.text_secondary()),
            Span::styled(state.status.clone(), colors.text_secondary()),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(60, 80, frame.area());

    // First render a solid background block to cover everything underneath
    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let help_content = vec![
        Line::from(""),
        heading(&colors, "Navigation"),
        key_line(&colors, "Tab / Shift+Tab", "Next / previous page"),
        key_line(&colors, "H", "Home"),
        key_line(&colors, "j/k or ↑/↓", "Move selection"),
        key_line(&colors, "g/G", "First / last row"),
        key_line(&colors, "/", "Search the current page"),
        Line::from(""),
        heading(&colors, "Content factory"),
        key_line(&colors, "a / r", "Approve / reject"),
        key_line(&colors, "f / s", "Cycle filters"),
        key_line(&colors, "1-9", "Toggle table columns"),
        key_line(&colors, "o", "Open original link"),
        key_line(&colors, "e", "Verify base post / edit adaptation"),
        key_line(&colors, "T L S", "Tone, length, style"),
        key_line(&colors, "x i v", "Text, image, verified checks"),
        key_line(&colors, "p / c", "Publish / cancel"),
        Line::from(""),
        heading(&colors, "Elsewhere"),
        key_line(&colors, "↵", "Open prompt / write chat message"),
        key_line(&colors, "l / L", "Like prompt / library view"),
        key_line(&colors, "n", "New source, assistant or ticket"),
        key_line(&colors, "m r o d", "Studio model, resolution, orientation, duration"),
        key_line(&colors, "1-4 / u", "Top-up preset / custom amount"),
        key_line(&colors, "t", "Theme picker"),
        key_line(&colors, "q", "Quit"),
    ];

    let help = Paragraph::new(help_content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.primary))
            .title(format!(" ❓ Help · astra v{} ", crate::VERSION))
            .title_bottom(Line::from(" Esc close ").centered()),
    );
    frame.render_widget(help, popup_area);
}

fn render_theme_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    // First render a solid background block to cover everything underneath
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let themes = Theme::all();
    let items: Vec<ListItem> = themes
        .iter()
        .enumerate()
        .map(|(i, theme_name)| {
            let palette = theme_name.palette();
            let selected = i == state.theme_picker_index;

            let preview = format!(
                "  {} {} ",
                if selected { "▸" } else { " " },
                theme_name.display_name()
            );

            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg).bg(colors.bg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(preview, style),
                Span::styled("█", Style::default().fg(palette.accent).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.secondary).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.success).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.warning).bg(colors.bg)),
            ]))
        })
        .collect();

    let theme_list = List::new(items)
        .style(Style::default().bg(colors.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.primary))
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(colors.bg))
                .title(format!(
                    " 🎨 Select Theme ({}/{}) ",
                    state.theme_picker_index + 1,
                    themes.len()
                ))
                .title_bottom(Line::from(" ↑↓ navigate │ ↵ apply │ Esc cancel ").centered()),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(state.theme_picker_index));
    frame.render_stateful_widget(theme_list, popup_area, &mut list_state);
}

fn render_input_popup(frame: &mut Frame, state: &AppState, target: InputTarget) {
    let colors = state.theme.colors();
    let area = frame.area();
    let height = if matches!(target, InputTarget::Adaptation(_)) { 12 } else { 5 };
    let width = area.width * 70 / 100;
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let title = match target {
        InputTarget::Adaptation(network) => format!(" ✏️ {} · {} ", target.title(), network.name()),
        _ => format!(" {} ", target.title()),
    };
    let cursor = if (state.current_tick() / 10) % 2 == 0 { "▏" } else { " " };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(state.input.clone(), colors.text()),
        Span::styled(cursor, colors.text_primary()),
    ]))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.primary))
            .style(Style::default().bg(colors.bg_secondary))
            .title(title)
            .title_bottom(Line::from(format!(" {} ", target.hint())).centered()),
    );
    frame.render_widget(input, popup_area);
}

/// Helper to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::repo::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("一二三四", 5), "一二…");
        assert_eq!(truncate("two\nlines", 20), "two lines");
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#3B82F6"), Some(Color::Rgb(0x3B, 0x82, 0xF6)));
        assert_eq!(hex_color("3B82F6"), None);
        assert_eq!(hex_color("#XYZ123"), None);
    }

    #[test]
    fn test_every_page_renders() {
        let mut store = MemoryStore::new();
        demo::seed(&mut store).unwrap();
        let mut state = AppState::new(Config::default(), Box::new(store)).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();

        let mut routes = Route::menu();
        routes.push(Route::PromptDetail("1".to_string()));
        routes.push(Route::NotFound("/nowhere".to_string()));
        for route in routes {
            state.navigate(route);
            terminal.draw(|frame| render(frame, &state)).unwrap();
        }

        state.mode = Mode::Help;
        terminal.draw(|frame| render(frame, &state)).unwrap();
        state.mode = Mode::Input(InputTarget::Chat);
        terminal.draw(|frame| render(frame, &state)).unwrap();
    }

    #[test]
    fn test_studio_shows_current_settings() {
        let mut store = MemoryStore::new();
        demo::seed(&mut store).unwrap();
        let mut state = AppState::new(Config::default(), Box::new(store)).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();

        state.navigate(Route::Video);
        state.cycle_studio(StudioField::Orientation);
        terminal.draw(|frame| render(frame, &state)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Sora"));
        assert!(screen.contains("Vertical"));
        assert!(screen.contains("4 s"));
    }
}
