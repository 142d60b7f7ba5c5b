//! Interaction state machine
//!
//! Idle: probe for a target every tick and start examining on a primary
//! click. Viewing: rotate grabbable items while the primary button is held,
//! and finish on a secondary click once the unlock timer has fired.
//!
//! Tick order is fixed: due timers, then the state machine, then object
//! transitions.

use crate::audio::{AudioLibrary, AudioOutput};
use crate::core::config::ExamineConfig;
use crate::core::timer::{TimerHandle, Timers};
use crate::core::types::{InteractableId, Pose, Seconds, SessionId};
use crate::interaction::animator::TransitionAnimator;
use crate::interaction::detector::detect;
use crate::interaction::input::FrameInput;
use crate::interaction::session::{InteractionEvent, InteractionState, Session, SessionTimer};
use crate::inventory::Inventory;
use crate::items::ItemRef;
use crate::ui::{HudState, Presentation};
use crate::world::Scene;
use glam::{Quat, Vec2};

pub struct InteractionController<P: Presentation = HudState, A: AudioOutput = AudioLibrary> {
    config: ExamineConfig,
    hud: P,
    audio: A,
    inventory: Inventory,
    animator: TransitionAnimator,
    timers: Timers<SessionTimer>,
    state: InteractionState,
    /// Last interactable the player used, kept after the session ends
    focused: Option<InteractableId>,
    /// Last hover value sent to the presentation
    hover: Option<bool>,
    next_session: u64,
}

impl<P: Presentation, A: AudioOutput> InteractionController<P, A> {
    pub fn new(config: ExamineConfig, hud: P, audio: A) -> Self {
        let animator = TransitionAnimator::new(config.transition_duration, config.transition_rate);
        Self {
            config,
            hud,
            audio,
            inventory: Inventory::new(),
            animator,
            timers: Timers::new(),
            state: InteractionState::Idle,
            focused: None,
            hover: None,
            next_session: 0,
        }
    }

    /// Run one simulation tick and return the notifications it produced
    pub fn tick(
        &mut self,
        scene: &mut Scene,
        viewer: &Pose,
        input: &FrameInput,
    ) -> Vec<InteractionEvent> {
        let mut events = Vec::new();

        for timer in self.timers.advance(input.dt) {
            match timer {
                SessionTimer::CanFinish(session) => self.can_finish(session, scene, &mut events),
            }
        }

        if self.state.is_viewing() {
            self.tick_viewing(scene, viewer, input, &mut events);
        } else {
            let detection = detect(&*scene, viewer, &self.config);
            self.report_hover(detection.is_some());

            if let Some(detection) = detection {
                if input.primary_pressed {
                    self.begin_view(scene, detection.interactable, &mut events);
                }
            }
        }

        self.animator.advance(input.dt, scene);
        events
    }

    /// Tear down any active session (e.g. on scene change).
    ///
    /// Cancels the pending unlock timer and clears the HUD. A grabbable
    /// object gets its rotation back and starts returning to its origin;
    /// transitions already in flight still run to completion.
    pub fn reset(&mut self, scene: &mut Scene) -> bool {
        let InteractionState::Viewing(session) = std::mem::take(&mut self.state) else {
            return false;
        };

        if let Some(handle) = session.unlock_timer {
            self.timers.cancel(handle);
        }
        if let (Some(origin), Some(object)) = (session.origin, scene.get_mut(session.interactable)) {
            object.pose.rotation = origin.rotation;
            self.animator.start(object, origin.position);
        }
        self.hud.set_back_affordance(false);
        self.hud.set_caption_text("");
        self.hover = None;
        tracing::info!("Session {:?} torn down", session.id);
        true
    }

    fn tick_viewing(
        &mut self,
        scene: &mut Scene,
        viewer: &Pose,
        input: &FrameInput,
        events: &mut Vec<InteractionEvent>,
    ) {
        let Some(session) = self.state.session() else {
            return;
        };
        let (target, grabbable, can_finish) =
            (session.interactable, session.item.grabbable, session.can_finish);

        if grabbable && input.primary_held {
            self.rotate_object(scene, viewer, target, input.pointer_delta);
        }

        if can_finish && input.secondary_pressed {
            self.finish_view(scene, events);
        }
    }

    fn report_hover(&mut self, interactable: bool) {
        if self.hover != Some(interactable) {
            self.hover = Some(interactable);
            self.hud.set_hover_cursor(interactable);
        }
    }

    fn begin_view(
        &mut self,
        scene: &mut Scene,
        id: InteractableId,
        events: &mut Vec<InteractionEvent>,
    ) {
        let Some(object) = scene.get_mut(id) else {
            return;
        };
        if object.is_moving() {
            return;
        }

        self.focused = Some(id);
        events.push(InteractionEvent::Interacted { interactable: id });

        let Some(item) = object.item().cloned() else {
            tracing::debug!("'{}' has no item to examine", object.name);
            return;
        };

        let session_id = SessionId(self.next_session);
        self.next_session += 1;
        events.push(InteractionEvent::BeginView {
            interactable: id,
            item: item.id,
        });
        tracing::info!("Examining '{}' ({})", item.name, object.name);

        let (examined, unlock_timer) = match object.matching_rule(&self.inventory) {
            Some(index) => {
                let rule = object.rules()[index].clone();
                let timer = self.interact(&rule.replacement, session_id);
                events.push(InteractionEvent::Substituted {
                    interactable: id,
                    rule: rule.label.clone(),
                    required: rule.required.id,
                    replacement: rule.replacement.id,
                });
                self.inventory.remove_item(&rule.required, &mut self.hud);
                if let Err(err) = object.resolve(index) {
                    tracing::error!("Substitution on '{}' failed: {}", object.name, err);
                }
                tracing::info!(
                    "'{}' substituted '{}' for '{}'",
                    object.name,
                    rule.replacement.name,
                    rule.required.name
                );
                (rule.replacement, timer)
            }
            None => {
                let timer = self.interact(&item, session_id);
                (item, timer)
            }
        };

        let origin = if examined.grabbable {
            let origin = object.pose;
            self.animator.start(object, self.config.viewing_anchor);
            Some(origin)
        } else {
            None
        };

        self.state = InteractionState::Viewing(Session {
            id: session_id,
            interactable: id,
            item: examined,
            origin,
            can_finish: false,
            unlock_timer: Some(unlock_timer),
        });
    }

    /// Present an item and schedule the finish unlock after its narration
    fn interact(&mut self, item: &ItemRef, session: SessionId) -> TimerHandle {
        if item.image.is_some() {
            self.hud.set_item_image(item.image);
        }

        let duration = self.audio.play(item.audio_clip);
        self.hud.set_caption_text(&item.text);

        let delay: Seconds = duration + self.config.finish_grace;
        tracing::debug!("'{}' can finish in {:.2}s", item.name, delay);
        self.timers.schedule(delay, SessionTimer::CanFinish(session))
    }

    fn can_finish(
        &mut self,
        session_id: SessionId,
        scene: &mut Scene,
        events: &mut Vec<InteractionEvent>,
    ) {
        let InteractionState::Viewing(session) = &mut self.state else {
            tracing::debug!("Dropping unlock for ended session {:?}", session_id);
            return;
        };
        if session.id != session_id {
            tracing::debug!("Dropping unlock for stale session {:?}", session_id);
            return;
        }

        session.can_finish = true;
        session.unlock_timer = None;
        let auto_finish = session.item.is_text_only();

        if auto_finish {
            self.finish_view(scene, events);
        } else {
            self.hud.set_back_affordance(true);
        }
        self.hud.set_caption_text("");
    }

    fn finish_view(&mut self, scene: &mut Scene, events: &mut Vec<InteractionEvent>) {
        let InteractionState::Viewing(session) = std::mem::take(&mut self.state) else {
            tracing::error!("finish_view called with no active session");
            debug_assert!(false, "finish_view called with no active session");
            return;
        };

        if let Some(handle) = session.unlock_timer {
            self.timers.cancel(handle);
        }
        self.hud.set_back_affordance(false);

        let item = &session.item;
        if item.inventory_eligible {
            self.inventory.add_item(item, &mut self.hud);
            self.audio.play(self.config.collect_sound);
            events.push(InteractionEvent::ItemCollected {
                interactable: session.interactable,
                item: item.id,
            });
        }

        if item.grabbable {
            match (session.origin, scene.get_mut(session.interactable)) {
                (Some(origin), Some(object)) => {
                    object.pose.rotation = origin.rotation;
                    self.animator.start(object, origin.position);
                }
                _ => tracing::warn!("Cannot return '{}' to its origin", item.name),
            }
        }

        tracing::info!("Finished examining '{}'", item.name);
        events.push(InteractionEvent::FinishView {
            interactable: session.interactable,
        });
    }

    /// Free rotation about the viewer's right and up axes
    fn rotate_object(
        &mut self,
        scene: &mut Scene,
        viewer: &Pose,
        target: InteractableId,
        delta: Vec2,
    ) {
        let Some(object) = scene.get_mut(target) else {
            return;
        };
        let pitch = -(delta.y * self.config.rotate_speed).to_radians();
        let yaw = -(delta.x * self.config.rotate_speed).to_radians();

        let rotation = Quat::from_axis_angle(viewer.up(), yaw)
            * Quat::from_axis_angle(viewer.right(), pitch)
            * object.pose.rotation;
        object.pose.rotation = rotation.normalize();
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_viewing(&self) -> bool {
        self.state.is_viewing()
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn focused(&self) -> Option<InteractableId> {
        self.focused
    }

    pub fn config(&self) -> &ExamineConfig {
        &self.config
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn animator(&self) -> &TransitionAnimator {
        &self.animator
    }

    /// Current simulation clock
    pub fn now(&self) -> Seconds {
        self.timers.now()
    }

    /// Number of unlock timers still pending
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn hud(&self) -> &P {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut P {
        &mut self.hud
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Hand an item to the player outside of examination (scripted pickups, saves)
    pub fn give_item(&mut self, item: &ItemRef) -> bool {
        self.inventory.add_item(item, &mut self.hud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioClip;
    use crate::core::types::ClipId;
    use crate::items::fixtures::item;
    use crate::world::Interactable;
    use glam::Vec3;
    use std::sync::Arc;

    fn setup() -> (InteractionController, Scene) {
        let mut audio = AudioLibrary::new();
        audio
            .insert(AudioClip {
                id: ClipId(1),
                name: "narration".into(),
                duration: 1.0,
            })
            .unwrap();

        let mut scene = Scene::new();
        scene
            .add(Interactable::new(
                InteractableId(1),
                "note",
                Pose::at(Vec3::new(0.0, 0.0, -1.5)),
                0.2,
                Some(Arc::new(item(1, "note"))),
            ))
            .unwrap();

        let config = ExamineConfig {
            collect_sound: ClipId(1),
            ..Default::default()
        };
        (InteractionController::new(config, HudState::new(), audio), scene)
    }

    #[test]
    fn test_unlock_for_other_session_is_ignored() {
        let (mut ctl, mut scene) = setup();
        ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::click(0.0));
        let current = ctl.session().unwrap().id;

        ctl.timers
            .schedule(0.0, SessionTimer::CanFinish(SessionId(current.0 + 7)));
        let events = ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::idle(0.1));

        assert!(events.is_empty());
        assert!(!ctl.session().unwrap().can_finish);
    }

    #[test]
    fn test_second_click_while_viewing_is_ignored() {
        let (mut ctl, mut scene) = setup();
        ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::click(0.0));
        let session = ctl.session().unwrap().id;

        let events = ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::click(0.1));
        assert!(events.is_empty());
        assert_eq!(ctl.session().unwrap().id, session);
        assert_eq!(ctl.audio().played(), &[ClipId(1)]);
    }

    #[test]
    fn test_sessions_get_fresh_ids() {
        let (mut ctl, mut scene) = setup();
        ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::click(0.0));
        let first = ctl.session().unwrap().id;
        ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::idle(2.0));
        assert!(!ctl.is_viewing());

        ctl.tick(&mut scene, &Pose::IDENTITY, &FrameInput::click(0.1));
        assert_ne!(ctl.session().unwrap().id, first);
    }

    #[test]
    fn test_rotation_uses_viewer_axes() {
        let (mut ctl, mut scene) = setup();
        ctl.config.rotate_speed = 90.0;

        ctl.rotate_object(&mut scene, &Pose::IDENTITY, InteractableId(1), Vec2::new(1.0, 0.0));

        // A full unit of horizontal delta is a quarter turn about -up
        let rotation = scene.get(InteractableId(1)).unwrap().pose.rotation;
        let expected = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        assert!(rotation.angle_between(expected) < 1e-4);
    }
}
