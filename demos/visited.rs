use std::collections::VecDeque;

use bucket_bitmap::{Bitmap, BitmapError};

const WIDTH: u32 = 12;
const HEIGHT: u32 = 6;

// '#' cells are walls
const GRID: [&str; HEIGHT as usize] = [
    "....#.......",
    ".##.#.####..",
    ".#..#....#..",
    ".#.###.#.#..",
    ".#.....#....",
    "...#####.#..",
];

fn is_wall(cell: u32) -> bool {
    GRID[(cell / WIDTH) as usize].as_bytes()[(cell % WIDTH) as usize] == b'#'
}

fn neighbours(cell: u32) -> impl Iterator<Item = u32> {
    let (x, y) = (cell % WIDTH, cell / WIDTH);
    [
        (x > 0).then(|| cell - 1),
        (x + 1 < WIDTH).then(|| cell + 1),
        (y > 0).then(|| cell - WIDTH),
        (y + 1 < HEIGHT).then(|| cell + WIDTH),
    ]
    .into_iter()
    .flatten()
}

fn reachable(start: u32) -> Result<Bitmap, BitmapError> {
    let mut visited = Bitmap::new(WIDTH * HEIGHT)?;
    let mut queue = VecDeque::from([start]);
    visited.set_one(start)?;

    while let Some(cell) = queue.pop_front() {
        for next in neighbours(cell) {
            if !is_wall(next) && !visited.is_one(next)? {
                visited.set_one(next)?;
                queue.push_back(next);
            }
        }
    }
    Ok(visited)
}

fn main() -> Result<(), BitmapError> {
    let visited = reachable(0)?;
    println!("reached {} of {} cells", visited.count_ones(), visited.len());
    for row in 0..HEIGHT {
        let line: String = (row * WIDTH..(row + 1) * WIDTH)
            .map(|cell| match (is_wall(cell), visited.is_one(cell)) {
                (true, _) => '#',
                (false, Ok(true)) => 'o',
                _ => '.',
            })
            .collect();
        println!("{line}");
    }
    println!("{visited}");
    Ok(())
}
