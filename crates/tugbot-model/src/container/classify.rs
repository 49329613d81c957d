use crate::{Container, LABEL_CREATED_FROM, LABEL_TEST, LABEL_TUGBOT, STATE_EXITED};

impl Container {
    /// Returns `true` if this is the agent's own container.
    ///
    /// Such containers are excluded from every other check.
    pub fn is_agent_self(&self) -> bool {
        self.labels().is_true(LABEL_TUGBOT)
    }

    /// Returns `true` if the container is an original test container that finished its run.
    ///
    /// Rules:
    /// - `tugbot.test` is `"true"`;
    /// - `tugbot.created.from` is absent or empty (not a re-run produced by the agent);
    /// - state is exactly `"exited"`; paused, created and other states are never candidates.
    pub fn is_candidate(&self) -> bool {
        let labels = self.labels();
        if !labels.is_true(LABEL_TEST) {
            return false;
        }
        if labels.get(LABEL_CREATED_FROM).is_some_and(|v| !v.is_empty()) {
            return false;
        }
        self.state() == STATE_EXITED
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Container, ContainerConfig, ContainerInfo, LABEL_CREATED_FROM, LABEL_TEST, LABEL_TUGBOT,
        Labels,
    };

    fn container(labels: &[(&str, &str)], state: &str) -> Container {
        let info = ContainerInfo {
            id: "c1id".into(),
            name: "/c1".into(),
            state: state.into(),
            config: ContainerConfig {
                labels: labels.iter().copied().collect::<Labels>(),
                ..Default::default()
            },
            ..Default::default()
        };
        Container::new(info, None)
    }

    #[test]
    fn agent_self_requires_true_value() {
        assert!(container(&[(LABEL_TUGBOT, "true")], "running").is_agent_self());
        assert!(!container(&[(LABEL_TUGBOT, "false")], "running").is_agent_self());
        assert!(!container(&[], "running").is_agent_self());
    }

    #[test]
    fn exited_original_test_container_is_candidate() {
        assert!(container(&[(LABEL_TEST, "true")], "exited").is_candidate());
        assert!(
            container(&[(LABEL_TEST, "true"), (LABEL_CREATED_FROM, "")], "exited").is_candidate()
        );
    }

    #[test]
    fn any_other_state_is_not_candidate() {
        let states = [
            "running", "paused", "created", "restarting", "dead", "Exited", "EXITED", "",
        ];
        for state in states {
            assert!(
                !container(&[(LABEL_TEST, "true")], state).is_candidate(),
                "state {state:?} must not be a candidate"
            );
        }
    }

    #[test]
    fn rerun_instance_is_not_candidate() {
        let c = container(&[(LABEL_TEST, "true"), (LABEL_CREATED_FROM, "c1")], "exited");
        assert!(!c.is_candidate());
    }

    #[test]
    fn non_test_container_is_not_candidate() {
        assert!(!container(&[], "exited").is_candidate());
        assert!(!container(&[(LABEL_TEST, "yes")], "exited").is_candidate());
    }
}
