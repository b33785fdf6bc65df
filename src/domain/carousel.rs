//! Testimonial carousel state machine. Timing lives in `application::carousel`;
//! this module only decides how each input moves the state.

use serde::Serialize;

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CarouselState {
    Idle {
        index: usize,
    },
    Transitioning {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

impl CarouselState {
    /// Slide currently on screen; the destination once a transition has started.
    pub fn visible_index(self) -> usize {
        match self {
            Self::Idle { index } => index,
            Self::Transitioning { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselInput {
    Tick,
    Next,
    Previous,
    Select(usize),
    TransitionComplete,
}

impl CarouselInput {
    /// Inputs that come from the visitor rather than a timer.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::Next | Self::Previous | Self::Select(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started {
        from: usize,
        to: usize,
        direction: Direction,
    },
    Settled {
        index: usize,
    },
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    state: CarouselState,
}

impl Carousel {
    pub fn new(len: usize) -> Result<Self, DomainError> {
        if len == 0 {
            return Err(DomainError::validation("carousel needs at least one slide"));
        }

        Ok(Self {
            len,
            state: CarouselState::Idle { index: 0 },
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn apply(&mut self, input: CarouselInput) -> Transition {
        match (self.state, input) {
            (CarouselState::Transitioning { to, .. }, CarouselInput::TransitionComplete) => {
                self.state = CarouselState::Idle { index: to };
                Transition::Settled { index: to }
            }
            (CarouselState::Transitioning { .. }, _) => Transition::Ignored,
            (CarouselState::Idle { .. }, CarouselInput::TransitionComplete) => Transition::Ignored,
            (CarouselState::Idle { index }, CarouselInput::Tick | CarouselInput::Next) => {
                self.start(index, (index + 1) % self.len, Direction::Forward)
            }
            (CarouselState::Idle { index }, CarouselInput::Previous) => {
                self.start(index, (index + self.len - 1) % self.len, Direction::Backward)
            }
            (CarouselState::Idle { index }, CarouselInput::Select(target)) => {
                if target == index || target >= self.len {
                    return Transition::Ignored;
                }
                let direction = if target > index {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                self.start(index, target, direction)
            }
        }
    }

    fn start(&mut self, from: usize, to: usize, direction: Direction) -> Transition {
        self.state = CarouselState::Transitioning {
            from,
            to,
            direction,
        };
        Transition::Started {
            from,
            to,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_on_first_slide() {
        let carousel = Carousel::new(3).unwrap();
        assert_eq!(carousel.state(), CarouselState::Idle { index: 0 });
    }

    #[test]
    fn empty_carousel_is_rejected() {
        assert!(Carousel::new(0).is_err());
    }

    #[test]
    fn tick_wraps_forward() {
        let mut carousel = Carousel::new(2).unwrap();
        carousel.apply(CarouselInput::Tick);
        carousel.apply(CarouselInput::TransitionComplete);
        let transition = carousel.apply(CarouselInput::Tick);
        assert_eq!(
            transition,
            Transition::Started {
                from: 1,
                to: 0,
                direction: Direction::Forward
            }
        );
    }

    #[test]
    fn previous_wraps_backward() {
        let mut carousel = Carousel::new(4).unwrap();
        let transition = carousel.apply(CarouselInput::Previous);
        assert_eq!(
            transition,
            Transition::Started {
                from: 0,
                to: 3,
                direction: Direction::Backward
            }
        );
    }

    #[test]
    fn manual_press_during_transition_is_dropped() {
        let mut carousel = Carousel::new(3).unwrap();
        carousel.apply(CarouselInput::Next);
        let in_flight = carousel.state();

        assert_eq!(carousel.apply(CarouselInput::Next), Transition::Ignored);
        assert_eq!(carousel.apply(CarouselInput::Previous), Transition::Ignored);
        assert_eq!(carousel.apply(CarouselInput::Select(2)), Transition::Ignored);
        assert_eq!(carousel.apply(CarouselInput::Tick), Transition::Ignored);
        assert_eq!(carousel.state(), in_flight);

        assert_eq!(
            carousel.apply(CarouselInput::TransitionComplete),
            Transition::Settled { index: 1 }
        );
        assert_eq!(carousel.state(), CarouselState::Idle { index: 1 });
    }

    #[test]
    fn select_jumps_directly() {
        let mut carousel = Carousel::new(5).unwrap();
        assert_eq!(
            carousel.apply(CarouselInput::Select(3)),
            Transition::Started {
                from: 0,
                to: 3,
                direction: Direction::Forward
            }
        );
        carousel.apply(CarouselInput::TransitionComplete);
        assert_eq!(
            carousel.apply(CarouselInput::Select(1)),
            Transition::Started {
                from: 3,
                to: 1,
                direction: Direction::Backward
            }
        );
    }

    #[test]
    fn select_current_or_out_of_range_is_ignored() {
        let mut carousel = Carousel::new(3).unwrap();
        assert_eq!(carousel.apply(CarouselInput::Select(0)), Transition::Ignored);
        assert_eq!(carousel.apply(CarouselInput::Select(9)), Transition::Ignored);
        assert_eq!(carousel.state(), CarouselState::Idle { index: 0 });
    }

    #[test]
    fn visible_index_follows_the_destination() {
        let mut carousel = Carousel::new(4).unwrap();
        assert_eq!(carousel.state().visible_index(), 0);

        carousel.apply(CarouselInput::Previous);
        assert_eq!(carousel.state().visible_index(), 3);

        carousel.apply(CarouselInput::TransitionComplete);
        assert_eq!(carousel.state().visible_index(), 3);
    }

    #[test]
    fn completion_while_idle_is_ignored() {
        let mut carousel = Carousel::new(3).unwrap();
        assert_eq!(
            carousel.apply(CarouselInput::TransitionComplete),
            Transition::Ignored
        );
    }

    #[test]
    fn single_slide_rotates_onto_itself() {
        let mut carousel = Carousel::new(1).unwrap();
        assert_eq!(
            carousel.apply(CarouselInput::Tick),
            Transition::Started {
                from: 0,
                to: 0,
                direction: Direction::Forward
            }
        );
    }
}
