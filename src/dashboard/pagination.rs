/// One page selector in `#pagination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    pub active: bool,
}

impl PageButton {
    pub fn class(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            ""
        }
    }
}

/// One button per page, none at all when there is a single page.
pub fn page_buttons(current: u32, total: u32) -> Vec<PageButton> {
    if total <= 1 {
        return Vec::new();
    }
    (1..=total)
        .map(|page| PageButton {
            page,
            active: page == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_renders_nothing() {
        assert!(page_buttons(1, 1).is_empty());
        assert!(page_buttons(1, 0).is_empty());
    }

    #[test]
    fn current_page_is_marked() {
        let buttons = page_buttons(3, 4);
        assert_eq!(buttons.len(), 4);
        let active: Vec<u32> = buttons.iter().filter(|b| b.active).map(|b| b.page).collect();
        assert_eq!(active, vec![3]);
        assert_eq!(buttons[2].class(), "active");
        assert_eq!(buttons[0].class(), "");
    }
}
