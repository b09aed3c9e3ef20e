//! Cluster document generation tests
//!
//! Tests cover:
//! - Document shape, host order and SSH port defaults
//! - Version suffixing
//! - Enrichment against a mocked GitHub API (match, no match, failures)
//! - Zero network calls without a credential

mod common;

use common::*;
use stratus_core::RuntimeConfig;
use stratus_github::{GitHubToken, TagSource};
use stratus_k0s::{
    ClusterDocument, ClusterRequest, ClusterTopologyBuilder, Error, HostDescriptor, HostRole,
    K0SCTL_API_VERSION,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> Option<GitHubToken> {
    Some(GitHubToken::new(TOKEN))
}

#[tokio::test]
async fn test_document_shape_without_credential() {
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());
    let request = ClusterRequest::new("1.26.1", test_hosts()).with_name("lab");

    let yaml = builder.build(&request, None).await.unwrap();
    let doc = ClusterDocument::from_yaml(&yaml).unwrap();

    assert_eq!(doc.api_version, K0SCTL_API_VERSION);
    assert_eq!(doc.kind, "Cluster");
    assert_eq!(doc.metadata.name, "lab");
    assert_eq!(doc.spec.k0s.version, "1.26.1+k0s.0");
    assert!(doc.spec.k0s.dynamic_config);

    let addresses: Vec<_> = doc.spec.hosts.iter().map(|h| h.ssh.address.as_str()).collect();
    assert_eq!(addresses, ["10.0.0.1", "10.0.0.2", "10.0.0.3"]);

    let ports: Vec<_> = doc.spec.hosts.iter().map(|h| h.ssh.port).collect();
    assert_eq!(ports, [22, 22, 2200]);

    assert_eq!(doc.spec.hosts[2].ssh.user, "admin");
    assert_eq!(doc.spec.hosts[2].ssh.key_path, "/keys/other");
    assert!(!yaml.contains("installFlags"));
    assert!(!yaml.contains("files"));
}

#[tokio::test]
async fn test_default_cluster_name() {
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());
    let doc = builder
        .build_document(&ClusterRequest::new("1.30.0", test_hosts()), None)
        .await
        .unwrap();

    assert_eq!(doc.metadata.name, "k0s-cluster");
}

#[tokio::test]
async fn test_version_suffix_applied_once_across_builds() {
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());
    let request = ClusterRequest::new("1.29.4", test_hosts());

    for _ in 0..3 {
        let yaml = builder.build(&request, None).await.unwrap();
        assert_eq!(yaml.matches("+k0s.0").count(), 1);
        assert!(yaml.contains("1.29.4+k0s.0"));
    }
}

#[tokio::test]
async fn test_no_credential_is_byte_identical_and_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let builder = ClusterTopologyBuilder::new(&config_for(&server));
    let request = ClusterRequest::new("1.26.1", test_hosts());

    let first = builder.build(&request, None).await.unwrap();
    let second = builder.build(&request, None).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_enrichment_with_matching_tag() {
    let server = MockServer::start().await;
    mock_upstream(&server).await;

    let builder = ClusterTopologyBuilder::new(&config_for(&server));
    let request = ClusterRequest::new("1.26.1", test_hosts());

    let doc = builder.build_document(&request, token()).await.unwrap();

    let controller = &doc.spec.hosts[0];
    let files = controller.files.as_ref().expect("controller gets files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].src, manifest_url("ccm/v26.4.0"));
    assert_eq!(files[0].name, "gcp-cloud-controller-manager");
    assert_eq!(files[0].dst_dir, "/var/lib/k0s/manifests/gcp-ccm");
    assert_eq!(files[0].perm, "0600");
    assert!(controller.install_flags.is_none());

    for worker in &doc.spec.hosts[1..] {
        assert!(worker.files.is_none());
        assert_eq!(
            worker.install_flags.as_deref().unwrap(),
            [
                "--enable-cloud-provider".to_string(),
                "--kubelet-extra-args=--cloud-provider=external".to_string()
            ]
        );
    }
}

#[tokio::test]
async fn test_enrichment_yaml_output() {
    let server = MockServer::start().await;
    mock_upstream(&server).await;

    let builder = ClusterTopologyBuilder::new(&config_for(&server));
    let yaml = builder
        .build(&ClusterRequest::new("1.26.1", test_hosts()), token())
        .await
        .unwrap();

    assert!(yaml.contains("installFlags:"));
    assert!(yaml.contains("dstDir: /var/lib/k0s/manifests/gcp-ccm"));
    assert!(yaml.contains("ccm/v26.4.0"));
    assert_eq!(yaml.matches("--enable-cloud-provider").count(), 2);
}

#[tokio::test]
async fn test_no_matching_tag_skips_enrichment() {
    let server = MockServer::start().await;
    mock_upstream(&server).await;

    let builder = ClusterTopologyBuilder::new(&config_for(&server));
    let yaml = builder
        .build(&ClusterRequest::new("2.99.0", test_hosts()), token())
        .await
        .unwrap();

    assert!(!yaml.contains("installFlags"));
    assert!(!yaml.contains("files"));
    assert!(yaml.contains("2.99.0+k0s.0"));
}

#[tokio::test]
async fn test_tag_listing_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let builder = ClusterTopologyBuilder::new(&config_for(&server));
    let err = builder
        .build(&ClusterRequest::new("1.26.1", test_hosts()), token())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Resolve(stratus_github::Error::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_role_scoped_directives_with_static_source() {
    let source = StaticTagSource::with_tag("ccm/v30.1.0");
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());

    let mut hosts = test_hosts();
    hosts.push(HostDescriptor::new(
        HostRole::Other("single".to_string()),
        "10.0.0.9",
        "root",
        "/keys/cluster",
    ));

    let doc = builder
        .build_with_source(
            &ClusterRequest::new("1.30.0", hosts),
            Some(&source as &dyn TagSource),
        )
        .await
        .unwrap();

    for host in &doc.spec.hosts {
        match &host.role {
            HostRole::Controller => assert!(host.install_flags.is_none() && host.files.is_some()),
            HostRole::Worker => assert!(host.files.is_none() && host.install_flags.is_some()),
            HostRole::Other(role) => {
                assert_eq!(role, "single");
                assert!(host.files.is_none() && host.install_flags.is_none());
            }
        }
    }
    assert_eq!(source.calls(), (1, 1));
}

#[tokio::test]
async fn test_static_source_without_tag_skips_url_lookup() {
    let source = StaticTagSource::default();
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());

    let doc = builder
        .build_with_source(
            &ClusterRequest::new("1.30.0", test_hosts()),
            Some(&source as &dyn TagSource),
        )
        .await
        .unwrap();

    assert!(doc
        .spec
        .hosts
        .iter()
        .all(|h| h.files.is_none() && h.install_flags.is_none()));
    assert_eq!(source.calls(), (1, 0));
}

#[tokio::test]
async fn test_invalid_input_fails_before_resolution() {
    let source = StaticTagSource::with_tag("ccm/v26.4.0");
    let builder = ClusterTopologyBuilder::new(&RuntimeConfig::default());

    let err = builder
        .build_with_source(
            &ClusterRequest::new("1.26.1", vec![]),
            Some(&source as &dyn TagSource),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoHosts));
    assert_eq!(source.calls(), (0, 0));
}
