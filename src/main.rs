/*

tessel_rs: renders a translation tessellation built from a single
perturbed rectangle, with selectable fill/outline/hatch styles.

 */

// bunch of standard library stuff
use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
extern crate cairo;

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

#[macro_use]
extern crate error_chain;

mod errors {

    error_chain!{

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error) #[cfg(unix)];
            Cairo(::cairo::Error);
            CairoIo(::cairo::IoError);
        }

    }

}

use errors::*;

//////////////////////////////////////////////////////////////////////
// define a statically allocated map for style lookups

use phf::phf_map;

//////////////////////////////////////////////////////////////////////
// constants for the base tile and for design file limits

const PI: f64 = std::f64::consts::PI;

const TILE_WIDTH: f64 = 100.0;
const TILE_HEIGHT: f64 = 100.0;

const OFFSET_LIMIT: f64 = 30.0;

const GRID_MIN: i64 = 3;
const GRID_MAX: i64 = 10;

//////////////////////////////////////////////////////////////////////
// constants for page layout

const INCH: f64 = 72.0;

const PAGE_EDGE: f64 = 10.0 * INCH;
const MARGIN: f64 = 0.5 * INCH;

const PNG_EDGE: i32 = 1000;

const FILL_ALPHA: f64 = 0.8;

// hatch geometry, in page units
const HATCH_SPACING: f64 = 9.0;
const HATCH_DIAG_SPACING: f64 = 6.0;
const HATCH_DOT_SPACING: f64 = 11.0;
const HATCH_DOT_RADIUS: f64 = 2.2;
const HATCH_LINE_WIDTH: f64 = 0.75;

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

type Vec2d = nalgebra::Vector2<f64>;
type Point2d = nalgebra::geometry::Point2<f64>;
type Translation2d = nalgebra::Translation2<f64>;
type Transform2d = nalgebra::Transform2<f64>;
type Matrix3d = nalgebra::Matrix3<f64>;

//////////////////////////////////////////////////////////////////////
// Rect2d type has lower-left p0 and upper-right p1

#[derive(Debug,PartialEq,Clone,Copy)]
struct Rect2d {

    p0: Point2d,
    p1: Point2d

}

impl Rect2d {

    // empty rectangle has p0 > p1
    fn empty() -> Self {

        let p0 = Point2d::new(f64::MAX, f64::MAX);
        let p1 = -p0;

        Rect2d { p0: p0, p1: p1 }

    }

    // new rect from points
    fn new(p0: Point2d, p1: Point2d) -> Self {
        Rect2d { p0: p0, p1: p1 }
    }

    // expand this rect to include the given point
    fn expand(&mut self, p: &Point2d) {
        self.p0 = self.p0.inf(p);
        self.p1 = self.p1.sup(p);
    }

    // dimensions of this rect
    fn dims(&self) -> Vec2d {
        self.p1 - self.p0
    }

    // center of this rect
    fn center(&self) -> Point2d {
        self.p0 + 0.5*(self.p1 - self.p0)
    }

    // does point p lie inside (boundary included)?
    fn contains(&self, p: &Point2d) -> bool {
        p.x >= self.p0.x && p.x <= self.p1.x &&
            p.y >= self.p0.y && p.y <= self.p1.y
    }

}

//////////////////////////////////////////////////////////////////////
// the tile polygon: an ordered boundary of N >= 3 vertices, traversed
// once with no repeated closing vertex (paths are closed at draw time)

#[derive(Debug,PartialEq,Clone)]
struct Tile {
    points: Vec<Point2d>
}

impl Tile {

    fn new(points: Vec<Point2d>) -> Result<Tile> {

        if points.len() < 3 {
            bail!("a tile needs at least 3 vertices, got {:}", points.len());
        }

        Ok(Tile { points: points })

    }

    // derive a tileable polygon from a width x height rectangle by
    // displacing the midpoint of its top edge. the two replacement
    // edges still span the rectangle top corners, so a copy translated
    // by (0, -height) meets this tile along its straight bottom edge.
    //
    // only the top edge is perturbed; bottom, left and right stay
    // straight, so the horizontal seams are asymmetric.
    //
    // vertex order: TL, displaced midpoint, TR, BR, BL
    fn escher(width: f64, height: f64, offset: Vec2d) -> Result<Tile> {

        if width <= 0.0 || height <= 0.0 {
            bail!("tile dimensions must be positive, got {:} x {:}",
                  width, height);
        }

        let midpoint = Point2d::new(0.5*width, height);
        let bump = midpoint + offset;

        Tile::new(vec![
            Point2d::new(0.0, height),
            bump,
            Point2d::new(width, height),
            Point2d::new(width, 0.0),
            Point2d::new(0.0, 0.0)
        ])

    }

}

//////////////////////////////////////////////////////////////////////
// grid layout: replicate one tile across integer translations
//
// the ranges are centered on the origin using floor division for the
// negative bound and an inclusive positive bound, so a cols x rows
// request always places (cols + 1) x (rows + 1) tiles - one extra in
// each direction. that surplus is long-standing behavior and is kept.

#[derive(Debug,PartialEq)]
struct TileGrid {
    cols: i64,
    rows: i64,
    step: Vec2d
}

// one grid cell: the shared tile translated by (col*w, row*h)
#[derive(Debug,PartialEq,Clone,Copy)]
struct PlacedTile {
    col: i64,
    row: i64,
    translation: Vec2d
}

impl PlacedTile {

    // translated copy of the base tile boundary
    fn transformed(&self, tile: &Tile) -> Vec<Point2d> {
        tile.points.iter().map(|p| p + self.translation).collect()
    }

}

impl TileGrid {

    fn new(cols: i64, rows: i64,
           tile_width: f64, tile_height: f64) -> Result<TileGrid> {

        if cols < 1 || rows < 1 {
            bail!("grid needs at least one tile per axis, got {:} x {:}",
                  cols, rows);
        }

        if tile_width <= 0.0 || tile_height <= 0.0 {
            bail!("tile spacing must be positive, got {:} x {:}",
                  tile_width, tile_height);
        }

        Ok(TileGrid {
            cols: cols,
            rows: rows,
            step: Vec2d::new(tile_width, tile_height)
        })

    }

    // -(cols+1)/2 is floor(-cols/2) for positive cols
    fn col_range(&self) -> std::ops::RangeInclusive<i64> {
        -(self.cols + 1)/2 ..= self.cols/2
    }

    fn row_range(&self) -> std::ops::RangeInclusive<i64> {
        -(self.rows + 1)/2 ..= self.rows/2
    }

    fn count(&self) -> usize {
        ((self.cols + 1) * (self.rows + 1)) as usize
    }

    // lazy and restartable; columns vary slowest
    fn placements<'a>(&'a self) -> impl Iterator<Item=PlacedTile> + 'a {

        let step = self.step;
        let rows = self.row_range();

        self.col_range().flat_map(move |i| {
            rows.clone().map(move |j| PlacedTile {
                col: i,
                row: j,
                translation: Vec2d::new(step.x * (i as f64),
                                        step.y * (j as f64))
            })
        })

    }

    // bounds framing the whole grid, with one extra tile of margin on
    // the max side of each axis
    fn viewport(&self) -> Rect2d {

        let half = Vec2d::new(0.5 * self.step.x * (self.cols as f64),
                              0.5 * self.step.y * (self.rows as f64));

        Rect2d::new(Point2d::origin() - half,
                    Point2d::origin() + half + self.step)

    }

}

//////////////////////////////////////////////////////////////////////
// visual styles
//
// each named style is a fixed bundle of drawing attributes standing
// in for an externally generated texture. unknown names resolve to
// the regular style.

#[derive(Debug,PartialEq,Clone,Copy)]
enum Hatch {
    Cross,
    Diagonal,
    Dots
}

#[derive(Debug,PartialEq,Clone,Copy)]
struct TileStyle {
    fill: [f64; 3],
    outline: [f64; 3],
    line_width: f64,
    hatch: Option<Hatch>
}

const REGULAR_STYLE: TileStyle = TileStyle {
    fill: [229.0/255.0, 229.0/255.0, 229.0/255.0], // #E5E5E5
    outline: [0.0, 0.0, 0.0],
    line_width: 1.0,
    hatch: None
};

static STYLES: phf::Map<&'static str, TileStyle> = phf_map! {

    "regular" => REGULAR_STYLE,

    "art_deco" => TileStyle {
        fill: [196.0/255.0, 154.0/255.0, 108.0/255.0],  // #C49A6C
        outline: [74.0/255.0, 59.0/255.0, 42.0/255.0],  // #4A3B2A
        line_width: 2.0,
        hatch: Some(Hatch::Cross)
    },

    "deep_ocean" => TileStyle {
        fill: [70.0/255.0, 130.0/255.0, 180.0/255.0],   // #4682B4
        outline: [25.0/255.0, 25.0/255.0, 112.0/255.0], // #191970
        line_width: 1.0,
        hatch: Some(Hatch::Diagonal)
    },

    "neo_pop" => TileStyle {
        fill: [1.0, 105.0/255.0, 180.0/255.0],          // #FF69B4
        outline: [50.0/255.0, 205.0/255.0, 50.0/255.0], // #32CD32
        line_width: 0.5,
        hatch: Some(Hatch::Dots)
    },

};

fn lookup_style(name: &str) -> &'static TileStyle {
    STYLES.get(name).unwrap_or(&REGULAR_STYLE)
}

//////////////////////////////////////////////////////////////////////
// design file: keyword-per-line description of one rendering

#[derive(Debug,PartialEq)]
struct DesignSpec {
    offset: Vec2d,
    style: String,
    cols: i64,
    rows: i64
}

fn parse_numbers<T: std::str::FromStr>(tokens: &[&str]) -> Result<Vec<T>> {

    let mut rval = Vec::new();

    for value in tokens {
        if let Ok(number) = value.parse::<T>() {
            rval.push(number);
        } else {
            bail!("invalid number: {:}", value);
        }
    }

    Ok(rval)

}

impl DesignSpec {

    fn new() -> DesignSpec {
        DesignSpec {
            offset: Vec2d::new(0.0, 20.0),
            style: "regular".to_string(),
            cols: 6,
            rows: 6
        }
    }

    fn update_from(&mut self, line: &str) -> Result<()> {

        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.is_empty() {
            return Ok(());
        }

        let keyword = tokens[0];
        let rest = &tokens[1..];

        match keyword {

            "offset" => {

                let values: Vec<f64> = parse_numbers(rest)?;

                if values.len() != 2 {
                    bail!("offset needs exactly two values");
                }

                for v in &values {
                    if v.abs() > OFFSET_LIMIT {
                        bail!("offset {:} is outside the range [{:}, {:}]",
                              v, -OFFSET_LIMIT, OFFSET_LIMIT);
                    }
                }

                self.offset = Vec2d::new(values[0], values[1]);

            },

            "style" => {

                if rest.len() != 1 {
                    bail!("style needs exactly one name");
                }

                // misses fall back to the regular style at lookup time
                self.style = rest[0].to_string();

            },

            "grid" => {

                let values: Vec<i64> = parse_numbers(rest)?;

                if values.len() != 2 {
                    bail!("grid needs exactly two values");
                }

                for v in &values {
                    if *v < GRID_MIN || *v > GRID_MAX {
                        bail!("grid count {:} is outside the range [{:}, {:}]",
                              v, GRID_MIN, GRID_MAX);
                    }
                }

                self.cols = values[0];
                self.rows = values[1];

            },

            _ => {
                bail!("unknown keyword: {:}", keyword);
            }

        }

        Ok(())

    }

    fn parse(filename: &str, istr: &mut impl BufRead) -> Result<DesignSpec> {

        let mut spec = DesignSpec::new();
        let mut lineno = 0;

        loop {

            let mut line = String::new();

            lineno += 1;

            let len = istr.read_line(&mut line).chain_err(
                || format!("{:}:{:}: read error", filename, lineno))?;

            if len == 0 {
                break;
            }

            spec.update_from(line.as_str()).chain_err(
                || format!("{:}:{:}: parse error", filename, lineno))?;

        }

        Ok(spec)

    }

}

//////////////////////////////////////////////////////////////////////
// cairo drawing helpers

trait CairoVecOps {

    fn moveto(&self, p: &Point2d);
    fn lineto(&self, p: &Point2d);
    fn setcolor(&self, c: &[f64; 3]);
    fn setcolora(&self, c: &[f64; 3], alpha: f64);
    fn drawpoly(&self, poly: &Vec<Point2d>);

}

impl CairoVecOps for cairo::Context {

    fn moveto(&self, p: &Point2d) {
        self.move_to(p.x, p.y);
    }

    fn lineto(&self, p: &Point2d) {
        self.line_to(p.x, p.y);
    }

    fn setcolor(&self, c: &[f64; 3]) {
        self.set_source_rgb(c[0], c[1], c[2]);
    }

    fn setcolora(&self, c: &[f64; 3], alpha: f64) {
        self.set_source_rgba(c[0], c[1], c[2], alpha);
    }

    // the boundary does not repeat its first vertex, so close_path
    // supplies the final edge
    fn drawpoly(&self, poly: &Vec<Point2d>) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.moveto(p);
            } else {
                self.lineto(p);
            }
        }
        self.close_path();
    }

}

macro_rules! with_save_restore {

    ($ctx:ident, { $($tree:tt)* }) => {

        $ctx.save();

        {

            $($tree)*

        }

        $ctx.restore();

    }

}

//////////////////////////////////////////////////////////////////////
//
// make a Transform2d that will translate and scale the given
// contents_rect (input) to the given page_rect (output).
//
// the scale is uniform (smallest per-axis ratio) so the tiling keeps
// its 1:1 aspect ratio, and includes a vertical flip because graphics
// coordinate system is left-handed (y increases going down)

fn get_page_transform(contents_rect: &Rect2d,
                      page_rect: &Rect2d) -> (Transform2d, f64) {

    let cdims = contents_rect.dims();
    let pdims = page_rect.dims();

    let scl = (pdims.component_div(&cdims)).min();

    let vmid = contents_rect.center();
    let pmid = page_rect.center();

    let translate_page = Translation2d::new(pmid.x, pmid.y);

    let scale = Transform2d::from_matrix_unchecked(
        Matrix3d::new(
            scl, 0.0, 0.0,
            0.0, -scl, 0.0,
            0.0, 0.0, 1.0
        )
    );

    let translate_points = Translation2d::new(-vmid.x, -vmid.y);

    let transform = translate_page * scale * translate_points;

    (transform, scl)

}

//////////////////////////////////////////////////////////////////////
// hatch fills: clip to the polygon and cover its bounding box with
// the hatch primitive

fn draw_hatch(ctx: &cairo::Context,
              poly: &Vec<Point2d>,
              hatch: Hatch,
              color: &[f64; 3]) {

    let mut bbox = Rect2d::empty();

    for p in poly {
        bbox.expand(p);
    }

    let d = bbox.dims();

    with_save_restore!(ctx, {

        ctx.drawpoly(poly);
        ctx.clip();

        ctx.setcolor(color);
        ctx.set_line_width(HATCH_LINE_WIDTH);

        match hatch {

            Hatch::Cross => {

                let nx = (d.x / HATCH_SPACING).ceil() as usize;
                let ny = (d.y / HATCH_SPACING).ceil() as usize;

                for k in 0..=nx {
                    let x = bbox.p0.x + (k as f64)*HATCH_SPACING;
                    ctx.move_to(x, bbox.p0.y);
                    ctx.line_to(x, bbox.p1.y);
                }

                for k in 0..=ny {
                    let y = bbox.p0.y + (k as f64)*HATCH_SPACING;
                    ctx.move_to(bbox.p0.x, y);
                    ctx.line_to(bbox.p1.x, y);
                }

            },

            Hatch::Diagonal => {

                let n = ((d.x + d.y) / HATCH_DIAG_SPACING).ceil() as usize;

                for k in 0..=n {
                    let x = bbox.p0.x + (k as f64)*HATCH_DIAG_SPACING;
                    ctx.move_to(x, bbox.p0.y);
                    ctx.line_to(x - d.y, bbox.p1.y);
                }

            },

            Hatch::Dots => {

                let nx = (d.x / HATCH_DOT_SPACING).ceil() as usize;
                let ny = (d.y / HATCH_DOT_SPACING).ceil() as usize;

                for i in 0..=nx {
                    for j in 0..=ny {
                        let x = bbox.p0.x + (i as f64)*HATCH_DOT_SPACING;
                        let y = bbox.p0.y + (j as f64)*HATCH_DOT_SPACING;
                        ctx.new_sub_path();
                        ctx.arc(x, y, HATCH_DOT_RADIUS, 0.0, 2.0*PI);
                    }
                }

            }

        }

        ctx.stroke();

    });

}

//////////////////////////////////////////////////////////////////////
// draw every placed tile in page space: fill, optional hatch in the
// outline color, then the outline stroke

fn draw_tessellation(ctx: &cairo::Context,
                     tile: &Tile,
                     grid: &TileGrid,
                     style: &TileStyle,
                     page_rect: &Rect2d) {

    let (transform, _) = get_page_transform(&grid.viewport(), page_rect);

    for placed in grid.placements() {

        let mut points = placed.transformed(tile);

        for p in &mut points {
            *p = transform * *p;
        }

        ctx.drawpoly(&points);
        ctx.setcolora(&style.fill, FILL_ALPHA);
        ctx.fill();

        if let Some(hatch) = style.hatch {
            draw_hatch(ctx, &points, hatch, &style.outline);
        }

        ctx.drawpoly(&points);
        ctx.setcolor(&style.outline);
        ctx.set_line_width(style.line_width);
        ctx.stroke();

    }

}

//////////////////////////////////////////////////////////////////////

fn run() -> Result<()> {

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: {:?} DESIGNFILE", args[0]);
        std::process::exit(1);
    }

    let filename = Path::new(&args[1]);

    let basename = match filename.file_stem() {
        None => "output",
        Some(os_str) => os_str.to_str().unwrap_or("output")
    };

    let pdffile = basename.to_owned() + ".pdf";
    let pngfile = basename.to_owned() + ".png";

    let f = File::open(filename)?;
    let mut reader = BufReader::new(f);

    let design = DesignSpec::parse(&args[1], &mut reader)?;

    let tile = Tile::escher(TILE_WIDTH, TILE_HEIGHT, design.offset)?;
    let grid = TileGrid::new(design.cols, design.rows, TILE_WIDTH, TILE_HEIGHT)?;
    let style = lookup_style(design.style.as_str());

    println!("tile vertices:");

    for p in &tile.points {
        println!("  ({:8.2}, {:8.2})", p.x, p.y);
    }

    let viewport = grid.viewport();

    println!("placing {:} tiles ({:} x {:} requested)",
             grid.count(), design.cols, design.rows);

    println!("viewport is x: [{:.1}, {:.1}], y: [{:.1}, {:.1}]",
             viewport.p0.x, viewport.p1.x,
             viewport.p0.y, viewport.p1.y);

    let mm = Vec2d::repeat(MARGIN);

    let page_rect = Rect2d::new(Point2d::origin() + mm,
                                Point2d::new(PAGE_EDGE, PAGE_EDGE) - mm);

    let surface = cairo::PdfSurface::new(PAGE_EDGE, PAGE_EDGE, &pdffile)?;
    let ctx = cairo::Context::new(&surface);

    draw_tessellation(&ctx, &tile, &grid, style, &page_rect);

    ctx.show_page();

    // raster export reuses the same drawing path at bitmap scale
    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32, PNG_EDGE, PNG_EDGE)?;

    let ctx = cairo::Context::new(&surface);

    ctx.set_source_rgb(1.0, 1.0, 1.0);
    ctx.paint();

    ctx.scale((PNG_EDGE as f64) / PAGE_EDGE,
              (PNG_EDGE as f64) / PAGE_EDGE);

    draw_tessellation(&ctx, &tile, &grid, style, &page_rect);

    surface.flush();

    let mut pngout = File::create(&pngfile)?;
    surface.write_to_png(&mut pngout)?;

    println!("wrote {:} and {:}", pdffile, pngfile);

    Ok(())

}

quick_main!(run);

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    fn bumped_tile() -> Tile {
        Tile::escher(TILE_WIDTH, TILE_HEIGHT, Vec2d::new(0.0, 20.0)).unwrap()
    }

    #[test]
    fn escher_tile_worked_example() {

        let tile = bumped_tile();

        let expected = vec![
            Point2d::new(0.0, 100.0),
            Point2d::new(50.0, 120.0),
            Point2d::new(100.0, 100.0),
            Point2d::new(100.0, 0.0),
            Point2d::new(0.0, 0.0)
        ];

        assert_eq!(tile.points, expected);

    }

    #[test]
    fn escher_tile_is_deterministic() {
        let a = Tile::escher(87.5, 33.25, Vec2d::new(-12.5, 7.75)).unwrap();
        let b = Tile::escher(87.5, 33.25, Vec2d::new(-12.5, 7.75)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn escher_tile_always_has_five_vertices() {

        let offsets = [
            (0.0, 0.0), (30.0, -30.0), (-500.0, 1000.0), (0.25, -0.25)
        ];

        for &(ox, oy) in offsets.iter() {
            let tile = Tile::escher(100.0, 100.0, Vec2d::new(ox, oy)).unwrap();
            assert_eq!(tile.points.len(), 5);
        }

    }

    #[test]
    fn zero_offset_keeps_bump_on_top_edge_midpoint() {
        let tile = Tile::escher(80.0, 50.0, Vec2d::new(0.0, 0.0)).unwrap();
        assert_eq!(tile.points[1], Point2d::new(40.0, 50.0));
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Tile::escher(0.0, 100.0, Vec2d::new(0.0, 0.0)).is_err());
        assert!(Tile::escher(100.0, -1.0, Vec2d::new(0.0, 0.0)).is_err());
        assert!(Tile::new(vec![Point2d::origin(),
                               Point2d::new(1.0, 0.0)]).is_err());
    }

    #[test]
    fn grid_rejects_degenerate_requests() {
        assert!(TileGrid::new(0, 6, 100.0, 100.0).is_err());
        assert!(TileGrid::new(6, -2, 100.0, 100.0).is_err());
        assert!(TileGrid::new(6, 6, 0.0, 100.0).is_err());
    }

    #[test]
    fn grid_ranges_are_centered_with_floor_semantics() {

        let even = TileGrid::new(6, 6, 100.0, 100.0).unwrap();
        assert_eq!(even.col_range(), -3..=3);

        let odd = TileGrid::new(3, 3, 100.0, 100.0).unwrap();
        assert_eq!(odd.col_range(), -2..=1);

    }

    #[test]
    fn grid_places_one_extra_tile_per_axis() {

        let grid = TileGrid::new(6, 6, 100.0, 100.0).unwrap();
        assert_eq!(grid.count(), 49);
        assert_eq!(grid.placements().count(), 49);

        let grid = TileGrid::new(3, 3, 100.0, 100.0).unwrap();
        assert_eq!(grid.count(), 16);
        assert_eq!(grid.placements().count(), 16);

    }

    #[test]
    fn placements_are_restartable_and_column_major() {

        let grid = TileGrid::new(3, 4, 100.0, 50.0).unwrap();

        let first: Vec<PlacedTile> = grid.placements().collect();
        let second: Vec<PlacedTile> = grid.placements().collect();

        assert_eq!(first, second);

        assert_eq!((first[0].col, first[0].row), (-2, -2));
        assert_eq!((first[1].col, first[1].row), (-2, -1));

    }

    #[test]
    fn placed_vertices_are_exact_translations() {

        let tile = bumped_tile();
        let grid = TileGrid::new(6, 6, 100.0, 100.0).unwrap();

        for placed in grid.placements() {

            let moved = placed.transformed(&tile);

            for (p, q) in tile.points.iter().zip(moved.iter()) {
                assert_eq!(q.x, p.x + 100.0 * (placed.col as f64));
                assert_eq!(q.y, p.y + 100.0 * (placed.row as f64));
            }

        }

    }

    #[test]
    fn viewport_worked_example() {
        let grid = TileGrid::new(3, 3, 100.0, 100.0).unwrap();
        let viewport = grid.viewport();
        assert_eq!(viewport.p0, Point2d::new(-150.0, -150.0));
        assert_eq!(viewport.p1, Point2d::new(250.0, 250.0));
    }

    #[test]
    fn viewport_contains_even_grids() {

        // odd extents overhang the min side by half a tile (see the
        // layout notes), so containment is checked on even grids
        let tile = Tile::escher(100.0, 100.0, Vec2d::new(0.0, 0.0)).unwrap();

        for &n in [4, 6, 8, 10].iter() {

            let grid = TileGrid::new(n, n, 100.0, 100.0).unwrap();
            let viewport = grid.viewport();

            for placed in grid.placements() {
                for p in placed.transformed(&tile) {
                    assert!(viewport.contains(&p),
                            "{:?} outside {:?} for n={:}", p, viewport, n);
                }
            }

        }

    }

    #[test]
    fn unknown_style_falls_back_to_regular() {
        assert_eq!(lookup_style("does_not_exist"), lookup_style("regular"));
        assert_eq!(lookup_style(""), &REGULAR_STYLE);
    }

    #[test]
    fn named_styles_resolve() {
        assert_eq!(lookup_style("art_deco").line_width, 2.0);
        assert_eq!(lookup_style("deep_ocean").hatch, Some(Hatch::Diagonal));
        assert_eq!(lookup_style("neo_pop").hatch, Some(Hatch::Dots));
    }

    #[test]
    fn design_defaults_match_sliders() {

        let design = DesignSpec::parse("empty", &mut "".as_bytes()).unwrap();

        assert_eq!(design, DesignSpec {
            offset: Vec2d::new(0.0, 20.0),
            style: "regular".to_string(),
            cols: 6,
            rows: 6
        });

    }

    #[test]
    fn design_file_round_trip() {

        let text = "\
# a design
offset -10 25
style deep_ocean
grid 4 9
";

        let design = DesignSpec::parse("test", &mut text.as_bytes()).unwrap();

        assert_eq!(design.offset, Vec2d::new(-10.0, 25.0));
        assert_eq!(design.style, "deep_ocean");
        assert_eq!((design.cols, design.rows), (4, 9));

    }

    #[test]
    fn design_file_rejects_bad_input() {
        assert!(DesignSpec::parse("t", &mut "offset 40 0".as_bytes()).is_err());
        assert!(DesignSpec::parse("t", &mut "offset 1".as_bytes()).is_err());
        assert!(DesignSpec::parse("t", &mut "offset five 0".as_bytes()).is_err());
        assert!(DesignSpec::parse("t", &mut "grid 2 6".as_bytes()).is_err());
        assert!(DesignSpec::parse("t", &mut "grid 6 11".as_bytes()).is_err());
        assert!(DesignSpec::parse("t", &mut "wibble 1".as_bytes()).is_err());
    }

    #[test]
    fn later_design_lines_override_earlier_ones() {
        let text = "grid 3 3\ngrid 5 7\n";
        let design = DesignSpec::parse("t", &mut text.as_bytes()).unwrap();
        assert_eq!((design.cols, design.rows), (5, 7));
    }

    #[test]
    fn page_transform_preserves_aspect() {

        // wide contents onto a square page: the scale must come from
        // the wide axis and the midpoints must map to each other
        let contents = Rect2d::new(Point2d::new(-200.0, -100.0),
                                   Point2d::new(200.0, 100.0));

        let page = Rect2d::new(Point2d::new(0.0, 0.0),
                               Point2d::new(100.0, 100.0));

        let (transform, scl) = get_page_transform(&contents, &page);

        assert_eq!(scl, 0.25);
        assert_eq!(transform * contents.center(), page.center());

        // y flips, x does not
        let p = transform * Point2d::new(200.0, 100.0);
        assert_eq!(p, Point2d::new(100.0, 25.0));

    }

}
