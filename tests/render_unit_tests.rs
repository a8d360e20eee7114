//! Unit tests for template rendering

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use linuxmuster_mail::error::SetupError;
    use linuxmuster_mail::operations::render::{
        LDAP_COPIES, STAMP_PREFIX, render_directory, render_template,
    };
    use linuxmuster_mail::system::System as _;
    use linuxmuster_mail::system::mock::MockSystem;
    use std::path::{Path, PathBuf};

    const STAMP: &str = "20171122093000";

    #[test]
    fn render_single_placeholder() {
        let system = MockSystem::new()
            .with_file("/tpl/out.cf", b"# /tmp/out.cf\nuser=@@smtpuser@@\n")
            .unwrap()
            .with_dir("/tmp")
            .unwrap();

        let rendered = render_template(
            &system,
            Path::new("/tpl/out.cf"),
            &[("smtpuser", "alice")],
            STAMP,
            &[],
        )
        .unwrap();

        assert_eq!(rendered.output, PathBuf::from("/tmp/out.cf"));
        let content = system.read_to_string(Path::new("/tmp/out.cf")).unwrap();
        assert_eq!(
            content,
            format!("{STAMP_PREFIX}{STAMP}\n# /tmp/out.cf\nuser=alice\n")
        );
        assert!(rendered.unresolved.is_empty());
    }

    #[test]
    fn render_truncates_existing_output() {
        let system = MockSystem::new()
            .with_file("/tpl/a.cf", b"# /etc/a.cf\nshort\n")
            .unwrap()
            .with_file("/etc/a.cf", b"a much longer previous content\n".repeat(10).as_slice())
            .unwrap();

        render_template(&system, Path::new("/tpl/a.cf"), &[], STAMP, &[]).unwrap();

        let content = system.read_to_string(Path::new("/etc/a.cf")).unwrap();
        assert!(content.ends_with("# /etc/a.cf\nshort\n"));
        assert!(!content.contains("previous"));
    }

    #[test]
    fn ldap_users_copied_to_siblings() {
        let system = MockSystem::new()
            .with_file(
                "/tpl/ldap-users.cf",
                b"# /srv/docker/config/ldap-users.cf\nsearch_base = @@basedn@@\n",
            )
            .unwrap()
            .with_dir("/srv/docker/config")
            .unwrap();

        let rendered = render_template(
            &system,
            Path::new("/tpl/ldap-users.cf"),
            &[("basedn", "dc=linuxmuster,dc=lan")],
            STAMP,
            &[LDAP_COPIES],
        )
        .unwrap();

        assert_eq!(
            rendered.copies,
            vec![
                PathBuf::from("/srv/docker/config/ldap-groups.cf"),
                PathBuf::from("/srv/docker/config/ldap-aliases.cf"),
            ]
        );
        let users = system
            .read_to_string(Path::new("/srv/docker/config/ldap-users.cf"))
            .unwrap();
        assert!(users.contains("search_base = dc=linuxmuster,dc=lan"));
        for copy in &rendered.copies {
            assert_eq!(system.read_to_string(copy).unwrap(), users);
        }
    }

    #[test]
    fn other_templates_are_not_copied() {
        let system = MockSystem::new()
            .with_file("/tpl/ldap-domains.cf", b"# /cfg/ldap-domains.cf\nx\n")
            .unwrap()
            .with_dir("/cfg")
            .unwrap();

        let rendered = render_template(
            &system,
            Path::new("/tpl/ldap-domains.cf"),
            &[],
            STAMP,
            &[LDAP_COPIES],
        )
        .unwrap();

        assert!(rendered.copies.is_empty());
        assert_eq!(
            system.files(),
            vec![
                PathBuf::from("/cfg/ldap-domains.cf"),
                PathBuf::from("/tpl/ldap-domains.cf"),
            ]
        );
    }

    #[test]
    fn missing_header_is_distinct_error() {
        let system = MockSystem::new()
            .with_file("/tpl/broken.cf", b"no header\n@@domainname@@\n")
            .unwrap();

        let err = render_template(&system, Path::new("/tpl/broken.cf"), &[], STAMP, &[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::MissingHeader { .. })
        ));
    }

    #[test]
    fn unreadable_template() {
        let system = MockSystem::new();
        let err = render_template(&system, Path::new("/tpl/gone.cf"), &[], STAMP, &[])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::TemplateRead { .. })
        ));
    }

    #[test]
    fn unwritable_output() {
        let system = MockSystem::new()
            .with_file("/tpl/a.cf", b"# /etc/a.cf\nbody\n")
            .unwrap()
            .with_read_only("/etc/a.cf")
            .unwrap();

        let err = render_template(&system, Path::new("/tpl/a.cf"), &[], STAMP, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::TemplateWrite { .. })
        ));
    }

    #[test]
    fn missing_parent_directory_fails() {
        let system = MockSystem::new()
            .with_file("/tpl/a.cf", b"# /nonexistent/dir/a.cf\nbody\n")
            .unwrap();

        let err = render_template(&system, Path::new("/tpl/a.cf"), &[], STAMP, &[]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dir/a.cf"));
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        let system = MockSystem::new()
            .with_file("/tpl/a.cf", b"# /etc/a.cf\n@@domainname@@ @@unknown@@\n")
            .unwrap()
            .with_dir("/etc")
            .unwrap();

        let rendered = render_template(
            &system,
            Path::new("/tpl/a.cf"),
            &[("domainname", "linuxmuster.lan")],
            STAMP,
            &[],
        )
        .unwrap();

        assert_eq!(rendered.unresolved, vec!["@@unknown@@".to_owned()]);
        let content = system.read_to_string(Path::new("/etc/a.cf")).unwrap();
        assert!(content.contains("linuxmuster.lan @@unknown@@"));
    }

    #[test]
    fn render_directory_in_name_order_and_skips_subdirs() {
        let system = MockSystem::new()
            .with_file("/tpl/b.cf", b"# /out/b.cf\n@@x@@\n")
            .unwrap()
            .with_file("/tpl/a.cf", b"# /out/a.cf\n@@x@@\n")
            .unwrap()
            .with_dir("/tpl/subdir")
            .unwrap()
            .with_dir("/out")
            .unwrap();

        let rendered = render_directory(&system, Path::new("/tpl"), &[("x", "1")], STAMP, &[])
            .unwrap();

        let outputs: Vec<PathBuf> = rendered.into_iter().map(|r| r.output).collect();
        assert_eq!(
            outputs,
            vec![PathBuf::from("/out/a.cf"), PathBuf::from("/out/b.cf")]
        );
    }

    #[test]
    fn render_directory_stops_at_first_failure() {
        let system = MockSystem::new()
            .with_file("/tpl/a.cf", b"# /out/a.cf\nok\n")
            .unwrap()
            .with_file("/tpl/b.cf", b"missing header\n")
            .unwrap()
            .with_file("/tpl/c.cf", b"# /out/c.cf\nnever\n")
            .unwrap()
            .with_dir("/out")
            .unwrap();

        let result = render_directory(&system, Path::new("/tpl"), &[], STAMP, &[]);
        assert!(result.is_err());
        assert!(system.exists(Path::new("/out/a.cf")));
        assert!(!system.exists(Path::new("/out/c.cf")));
    }

    #[test]
    fn missing_template_directory() {
        let system = MockSystem::new();
        let err = render_directory(&system, Path::new("/tpl"), &[], STAMP, &[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::Filesystem { .. })
        ));
    }
}
