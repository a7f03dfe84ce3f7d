use crate::{Block, GridBlock};

/// Visitor pattern for traversing the block tree immutably
///
/// Default implementations walk the whole tree in storage order. Override
/// `visit_block` to act on nodes; call `walk_block` to keep descending.
pub trait Visitor: Sized {
    fn visit_blocks(&mut self, blocks: &[Block], parent: Option<&GridBlock>) {
        walk_blocks(self, blocks, parent);
    }

    fn visit_block(&mut self, block: &Block, _parent: Option<&GridBlock>) {
        walk_block(self, block);
    }
}

pub fn walk_blocks<V: Visitor>(visitor: &mut V, blocks: &[Block], parent: Option<&GridBlock>) {
    for block in blocks {
        visitor.visit_block(block, parent);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    if let Block::Grid(grid) = block {
        visitor.visit_blocks(&grid.children, Some(grid));
    }
}

/// Column span that exceeds its parent grid's size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanViolation {
    pub block_id: String,
    pub span: u32,
    pub grid_id: String,
    pub grid_size: u32,
}

struct Counter(usize);

impl Visitor for Counter {
    fn visit_block(&mut self, block: &Block, _parent: Option<&GridBlock>) {
        self.0 += 1;
        walk_block(self, block);
    }
}

/// Total number of blocks, nested ones included
pub fn count_blocks(blocks: &[Block]) -> usize {
    let mut counter = Counter(0);
    counter.visit_blocks(blocks, None);
    counter.0
}

/// Depth-first search by ID
pub fn find_by_id<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.id() == id {
            return Some(block);
        }
        if let Some(found) = block.children().and_then(|children| find_by_id(children, id)) {
            return Some(found);
        }
    }
    None
}

struct ImageUrls(Vec<String>);

impl Visitor for ImageUrls {
    fn visit_block(&mut self, block: &Block, _parent: Option<&GridBlock>) {
        if let Block::Image(image) = block {
            self.0.push(image.url.clone());
        }
        walk_block(self, block);
    }
}

pub fn collect_image_urls(blocks: &[Block]) -> Vec<String> {
    let mut urls = ImageUrls(Vec::new());
    urls.visit_blocks(blocks, None);
    urls.0
}

struct SpanChecker(Vec<SpanViolation>);

impl Visitor for SpanChecker {
    fn visit_block(&mut self, block: &Block, parent: Option<&GridBlock>) {
        if let (Some(span), Some(grid)) = (block.column_span(), parent) {
            if span > grid.size {
                self.0.push(SpanViolation {
                    block_id: block.id().to_string(),
                    span,
                    grid_id: grid.id.clone(),
                    grid_size: grid.size,
                });
            }
        }
        walk_block(self, block);
    }
}

/// Report column spans larger than the enclosing grid.
/// Spans on blocks outside any grid have no effect and are not reported.
pub fn find_span_violations(blocks: &[Block]) -> Vec<SpanViolation> {
    let mut checker = SpanChecker(Vec::new());
    checker.visit_blocks(blocks, None);
    checker.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Block> {
        vec![
            Block::text("a", "hello"),
            Block::grid(
                "g",
                2,
                vec![
                    Block::image("i1", "https://x/1.png", "one").with_column_span(3),
                    Block::grid("inner", 1, vec![Block::image("i2", "https://x/2.png", "two")]),
                ],
            ),
            Block::vertical_space("v", 2).with_column_span(9),
        ]
    }

    #[test]
    fn test_count_blocks() {
        assert_eq!(count_blocks(&sample()), 6);
        assert_eq!(count_blocks(&[]), 0);
    }

    #[test]
    fn test_find_by_id_nested() {
        let blocks = sample();
        assert_eq!(find_by_id(&blocks, "i2").map(|b| b.id()), Some("i2"));
        assert!(find_by_id(&blocks, "missing").is_none());
    }

    #[test]
    fn test_collect_image_urls_in_order() {
        assert_eq!(
            collect_image_urls(&sample()),
            vec!["https://x/1.png".to_string(), "https://x/2.png".to_string()]
        );
    }

    #[test]
    fn test_span_violations_only_inside_grids() {
        let violations = find_span_violations(&sample());
        assert_eq!(
            violations,
            vec![SpanViolation {
                block_id: "i1".to_string(),
                span: 3,
                grid_id: "g".to_string(),
                grid_size: 2,
            }]
        );
    }
}
