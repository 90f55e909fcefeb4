use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate},
};
use ledfrog::board::{VehicleColour, COLUMNS, ROWS};
use ledfrog::{Engine, Redraw, Session, Tile};
use std::io::{self, Write};
use std::time::Duration;

const HUD_ROWS: u16 = 2;
const FOOTER_ROWS: u16 = 1;
const BANNER_TIME: Duration = Duration::from_millis(1500);

/// Last known colour of every LED, kept current from the engine's redraw
/// requests rather than repainted wholesale each frame.
pub(crate) struct LedMatrix {
    tiles: [[Tile; COLUMNS as usize]; ROWS as usize],
}

impl LedMatrix {
    pub(crate) fn new() -> Self {
        Self {
            tiles: [[Tile::Hole; COLUMNS as usize]; ROWS as usize],
        }
    }

    fn on_field(row: i8, column: i8) -> bool {
        (0..ROWS).contains(&row) && (0..COLUMNS).contains(&column)
    }

    pub(crate) fn apply(&mut self, redraw: Redraw, engine: &Engine) {
        match redraw {
            Redraw::All => {
                for row in 0..ROWS {
                    self.tiles[row as usize] = engine.row_tiles(row);
                }
            }
            Redraw::Row(row) => {
                if (0..ROWS).contains(&row) {
                    self.tiles[row as usize] = engine.row_tiles(row);
                }
            }
            Redraw::Cell { row, column } => {
                if !Self::on_field(row, column) {
                    return;
                }
                let frog = engine.frog();
                let tile = if frog.row() == row && frog.column() == column {
                    engine.frog_tile()
                } else {
                    engine.tile_at(row, column)
                };
                self.tiles[row as usize][column as usize] = tile;
            }
        }
    }

    pub(crate) fn sync(&mut self, session: &mut Session) {
        let pending: Vec<Redraw> = session.drain_redraws().collect();
        for redraw in pending {
            self.apply(redraw, session.engine());
        }
    }

    pub(crate) fn tile(&self, row: i8, column: i8) -> Tile {
        self.tiles[row as usize][column as usize]
    }
}

/// Brief "LEVEL N" card laid over the field whenever a level starts, and a
/// standing "GAME OVER" once the game ends.
pub(crate) struct LevelBanner {
    level: u32,
    over: bool,
    left: Duration,
}

impl LevelBanner {
    pub(crate) fn new() -> Self {
        Self {
            level: 0,
            over: false,
            left: Duration::ZERO,
        }
    }

    pub(crate) fn update(&mut self, session: &Session, dt: Duration) {
        let restarted = self.over && !session.is_over();
        if session.level() != self.level || restarted {
            self.level = session.level();
            self.left = BANNER_TIME;
        } else {
            self.left = self.left.saturating_sub(dt);
        }
        self.over = session.is_over();
    }

    pub(crate) fn text(&self) -> Option<String> {
        if self.over {
            Some("GAME OVER".to_string())
        } else if !self.left.is_zero() {
            Some(format!("LEVEL {}", self.level))
        } else {
            None
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    hud_fg: Color,
    hud_bg: Color,
    accent_fg: Color,
    frame_fg: Color,
}

const PALETTE: Palette = Palette {
    hud_fg: Color::Rgb {
        r: 160,
        g: 255,
        b: 210,
    },
    hud_bg: Color::Rgb { r: 5, g: 7, b: 10 },
    accent_fg: Color::Rgb {
        r: 255,
        g: 220,
        b: 140,
    },
    frame_fg: Color::Rgb {
        r: 60,
        g: 80,
        b: 70,
    },
};

fn tile_colour(tile: Tile) -> Color {
    match tile {
        Tile::Verge => Color::Rgb {
            r: 120,
            g: 220,
            b: 120,
        },
        Tile::Road => Color::Rgb {
            r: 14,
            g: 14,
            b: 18,
        },
        Tile::Vehicle(VehicleColour::Red) => Color::Rgb {
            r: 235,
            g: 50,
            b: 40,
        },
        Tile::Vehicle(VehicleColour::Yellow) => Color::Rgb {
            r: 245,
            g: 215,
            b: 60,
        },
        Tile::Water => Color::Rgb { r: 8, g: 14, b: 34 },
        Tile::Log => Color::Rgb {
            r: 230,
            g: 130,
            b: 30,
        },
        Tile::Hole => Color::Rgb { r: 0, g: 0, b: 0 },
        Tile::Home | Tile::Frog => Color::Rgb {
            r: 30,
            g: 200,
            b: 40,
        },
        Tile::DeadFrog => Color::Rgb {
            r: 255,
            g: 255,
            b: 150,
        },
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct FrameCell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: FrameCell = FrameCell {
    ch: ' ',
    fg: Color::White,
    bg: Color::Black,
};

/// Double-buffered terminal cells; only cells that changed since the last
/// flush are written.
pub(crate) struct Renderer {
    w: u16,
    h: u16,
    prev: Vec<FrameCell>,
    cur: Vec<FrameCell>,
}

impl Renderer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        let n = (w as usize) * (h as usize);
        Self {
            w,
            h,
            prev: vec![BLANK; n],
            cur: vec![BLANK; n],
        }
    }

    pub(crate) fn resize(&mut self, w: u16, h: u16) {
        *self = Self::new(w, h);
    }

    pub(crate) fn size(&self) -> (u16, u16) {
        (self.w, self.h)
    }

    fn clear_to(&mut self, fg: Color, bg: Color) {
        for c in &mut self.cur {
            *c = FrameCell { ch: ' ', fg, bg };
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Color, bg: Color) {
        if x >= self.w || y >= self.h {
            return;
        }
        let i = (y as usize) * (self.w as usize) + (x as usize);
        self.cur[i] = FrameCell { ch, fg, bg };
    }

    fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
        for (xx, ch) in (x..self.w).zip(s.chars()) {
            self.put(xx, y, ch, fg, bg);
        }
    }

    pub(crate) fn flush_diff<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        queue!(out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.h {
            let row_off = (y as usize) * (self.w as usize);
            for x in 0..self.w {
                let i = row_off + (x as usize);
                let a = self.cur[i];
                if a == self.prev[i] {
                    continue;
                }
                queue!(out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(a.fg) {
                    queue!(out, SetForegroundColor(a.fg))?;
                    cur_fg = Some(a.fg);
                }
                if cur_bg != Some(a.bg) {
                    queue!(out, SetBackgroundColor(a.bg))?;
                    cur_bg = Some(a.bg);
                }
                queue!(out, Print(a.ch))?;
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        Ok(())
    }
}

/// Where the matrix goes on screen and how many terminal cells one LED takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    led_w: u16,
    led_h: u16,
    x0: u16,
    y0: u16,
}

pub(crate) fn fit_layout(term_w: u16, term_h: u16) -> Option<Layout> {
    let usable_h = term_h.checked_sub(HUD_ROWS + FOOTER_ROWS + 2)?;
    let usable_w = term_w.checked_sub(2)?;
    let cols = COLUMNS as u16;
    let rows = ROWS as u16;

    // LEDs drawn roughly square: twice as wide as tall
    let led_h = (usable_h / rows).min(usable_w / (cols * 2)).min(3);
    if led_h == 0 {
        return None;
    }
    let led_w = led_h * 2;

    let field_w = cols * led_w + 2;
    let field_h = rows * led_h + 2;
    Some(Layout {
        led_w,
        led_h,
        x0: (term_w - field_w) / 2,
        y0: HUD_ROWS + (term_h - HUD_ROWS - FOOTER_ROWS - field_h) / 2,
    })
}

pub(crate) fn draw_frame(
    r: &mut Renderer,
    layout: Option<Layout>,
    m: &LedMatrix,
    s: &Session,
    banner: Option<&str>,
) {
    let p = PALETTE;
    let (w, h) = r.size();
    r.clear_to(p.hud_fg, p.hud_bg);

    let Some(v) = layout else {
        r.put_str(0, 0, "Terminal too small. Try at least ~36x14.", p.hud_fg, p.hud_bg);
        return;
    };

    let line1 = format!(
        "LEDFROG  |  Score {:06}  Lives {}  Level {}  Time {:02}",
        s.score(),
        "♥".repeat(s.lives() as usize),
        s.level(),
        s.seconds_left()
    );
    let line2 = if s.is_over() {
        "GAME OVER  |  N new game   Q quit"
    } else if s.is_paused() {
        "PAUSED  |  P resume   Q quit"
    } else {
        "Arrows/WASD/U L R hop   P pause   Q quit"
    };
    r.put_str(0, 0, &line1, p.hud_fg, p.hud_bg);
    let banner_fg = if s.is_over() || s.is_paused() {
        p.accent_fg
    } else {
        p.hud_fg
    };
    r.put_str(0, 1, line2, banner_fg, p.hud_bg);

    let field_w = COLUMNS as u16 * v.led_w;
    let field_h = ROWS as u16 * v.led_h;
    let (fx, fy) = (v.x0 + 1, v.y0 + 1);

    // frame
    for x in v.x0..=v.x0 + field_w + 1 {
        r.put(x, v.y0, '─', p.frame_fg, p.hud_bg);
        r.put(x, fy + field_h, '─', p.frame_fg, p.hud_bg);
    }
    for y in v.y0..=fy + field_h {
        r.put(v.x0, y, '│', p.frame_fg, p.hud_bg);
        r.put(fx + field_w, y, '│', p.frame_fg, p.hud_bg);
    }
    r.put(v.x0, v.y0, '┌', p.frame_fg, p.hud_bg);
    r.put(fx + field_w, v.y0, '┐', p.frame_fg, p.hud_bg);
    r.put(v.x0, fy + field_h, '└', p.frame_fg, p.hud_bg);
    r.put(fx + field_w, fy + field_h, '┘', p.frame_fg, p.hud_bg);

    // row 7 sits at the top
    for row in 0..ROWS {
        let sy = fy + (ROWS - 1 - row) as u16 * v.led_h;
        for column in 0..COLUMNS {
            let sx = fx + column as u16 * v.led_w;
            let bg = tile_colour(m.tile(row, column));
            for dy in 0..v.led_h {
                for dx in 0..v.led_w {
                    r.put(sx + dx, sy + dy, ' ', p.hud_fg, bg);
                }
            }
        }
    }

    if let Some(text) = banner {
        let len = text.chars().count() as u16;
        let bx = fx + field_w.saturating_sub(len) / 2;
        let by = fy + field_h / 2;
        r.put_str(bx, by, text, p.accent_fg, p.hud_bg);
    }

    let footer = format!("16x8 LED field   (Terminal: {}x{})", w, h);
    r.put_str(0, h.saturating_sub(1), &footer, p.hud_fg, p.hud_bg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledfrog::board::{Board, Channel, Lane};
    use ledfrog::riverbank::Riverbank;
    use ledfrog::{Drift, Rules, Step};

    fn synced(session: &mut Session) -> LedMatrix {
        let mut m = LedMatrix::new();
        m.sync(session);
        m
    }

    #[test]
    fn first_sync_paints_field_and_frog() {
        let mut s = Session::new(Rules::default());
        let m = synced(&mut s);
        assert_eq!(m.tile(0, 7), Tile::Frog);
        assert_eq!(m.tile(0, 6), Tile::Verge);
        assert_eq!(m.tile(7, 1), Tile::Hole);
        assert_eq!(m.tile(5, 0), Tile::Water);
    }

    #[test]
    fn hop_moves_the_frog_pixel() {
        let mut s = Session::new(Rules::default());
        let mut m = synced(&mut s);
        s.hop(Step::Left);
        m.sync(&mut s);
        assert_eq!(m.tile(0, 7), Tile::Verge);
        assert_eq!(m.tile(0, 6), Tile::Frog);
    }

    #[test]
    fn stale_cell_requests_do_not_leave_ghost_frogs() {
        let mut e = Engine::new();
        let mut m = LedMatrix::new();
        e.move_left();
        e.move_left();
        let pending: Vec<Redraw> = e.drain_redraws().collect();
        for redraw in pending {
            m.apply(redraw, &e);
        }
        assert_eq!(m.tile(0, 6), Tile::Verge);
        assert_eq!(m.tile(0, 5), Tile::Frog);
    }

    #[test]
    fn scrolled_row_matches_engine() {
        let mut e = Engine::new();
        let mut m = LedMatrix::new();
        e.scroll_lane(1, Drift::Left);
        let pending: Vec<Redraw> = e.drain_redraws().collect();
        for redraw in pending {
            m.apply(redraw, &e);
        }
        for c in 0..COLUMNS {
            assert_eq!(m.tile(2, c), e.tile_at(2, c));
        }
    }

    #[test]
    fn off_field_cells_are_ignored() {
        let e = Engine::new();
        let mut m = LedMatrix::new();
        m.apply(Redraw::Cell { row: -1, column: 7 }, &e);
        m.apply(Redraw::Cell { row: 3, column: 16 }, &e);
        m.apply(Redraw::Row(8), &e);
        assert_eq!(m.tile(0, 0), Tile::Hole);
    }

    #[test]
    fn layout_needs_room_for_the_field() {
        assert!(fit_layout(20, 10).is_none());
        let v = fit_layout(80, 24).expect("fits");
        assert_eq!(v.led_w, v.led_h * 2);
        assert!(v.x0 + COLUMNS as u16 * v.led_w + 2 <= 80);
    }

    #[test]
    fn frame_draws_without_panicking_at_odd_sizes() {
        let mut s = Session::new(Rules::default());
        let m = synced(&mut s);
        for (w, h) in [(10, 5), (36, 14), (80, 24), (200, 60)] {
            let mut r = Renderer::new(w, h);
            draw_frame(&mut r, fit_layout(w, h), &m, &s, Some("LEVEL 12"));
        }
    }

    /// Logs everywhere, no traffic, only the hole at column 7 open.
    fn one_hop_board() -> Board {
        Board {
            lanes: [
                Lane::new(0, VehicleColour::Red, Drift::Right),
                Lane::new(0, VehicleColour::Yellow, Drift::Left),
                Lane::new(0, VehicleColour::Red, Drift::Right),
            ],
            channels: [
                Channel::new(u64::MAX, Drift::Left),
                Channel::new(u64::MAX, Drift::Right),
            ],
            riverbank: Riverbank::new(!(1 << 7)),
        }
    }

    #[test]
    fn level_card_shows_briefly_after_each_level_start() {
        let mut s = Session::with_board(Rules::default(), one_hop_board());
        let mut banner = LevelBanner::new();
        banner.update(&s, Duration::ZERO);
        assert_eq!(banner.text().as_deref(), Some("LEVEL 1"));

        banner.update(&s, BANNER_TIME);
        assert_eq!(banner.text(), None);

        for _ in 0..7 {
            s.hop(Step::Forward);
        }
        assert_eq!(s.level(), 2);
        banner.update(&s, Duration::from_millis(10));
        assert_eq!(banner.text().as_deref(), Some("LEVEL 2"));
    }

    #[test]
    fn game_over_card_stays_until_a_new_game() {
        let rules = Rules {
            initial_lives: 1,
            ..Rules::default()
        };
        let mut s = Session::new(rules);
        let mut banner = LevelBanner::new();
        banner.update(&s, BANNER_TIME);
        s.hop(Step::Backward);
        assert!(s.is_over());
        banner.update(&s, Duration::from_secs(10));
        assert_eq!(banner.text().as_deref(), Some("GAME OVER"));

        s.new_game();
        banner.update(&s, Duration::from_millis(10));
        assert_eq!(banner.text().as_deref(), Some("LEVEL 1"));
    }
}
