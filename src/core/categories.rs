// LogLens - core/categories.rs
//
// The compiled-in vocabulary used by closed-vocabulary mode.
// Static data, not logic: extend the list and bump VOCABULARY_VERSION.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Version of the category list below. Reported by `/health`.
pub const VOCABULARY_VERSION: &str = "1";

/// Known Unreal Engine log categories, plus a few common non-`Log` tags
/// (`PacketHandlerLog`, `MP4`, ...) that appear in real engine output.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "LogPath", "LogController", "LogPhysics", "LogBlueprint", "LogBlueprintUserMessages",
    "LogAnimation", "LogRootMotion", "LogLevel", "LogSkeletalMesh", "LogStaticMesh", "LogNet",
    "LogRep", "LogNetPlayerMovement", "LogNetTraffic", "LogRepTraffic", "LogNetFastTArray",
    "LogNetDormancy", "LogSkeletalControl", "LogSubtitle", "LogTexture", "LogPlayerManagement",
    "LogSecurity", "LogEngineSessionManager", "LogHAL", "LogSerialization", "LogUnrealMath",
    "LogUnrealMatrix", "LogContentComparisonCommandlet", "LogNetPackageMap", "LogNetSerialization",
    "LogMemory", "LogProfilingDebugging", "LogCore", "LogOutputDevice", "LogSHA", "LogStats",
    "LogStreaming", "LogInit", "LogExit", "LogExec", "LogScript", "LogLocalization",
    "LogLongPackageNames", "LogProcess", "LogLoad", "LogTemp", "LogAITestSuite",
    "LogBehaviorTreeTest", "LogAssetTools", "LogAutomationDriver", "LogBlueprintCodeGen",
    "LogCollectionManager", "LogCollisionAnalyzer", "LogCrashDebugHelper", "LogDatasmith",
    "LogDerivedDataCache", "LogDesktopPlatform", "LogDirectoryWatcher", "LogZipArchiveWriter",
    "LogFunctionalTest", "LogGameplayDebug", "LogHotReload", "LogLocalizationService",
    "LogMeshDescriptionBuildStatistic", "LogMeshBuilder", "LogMeshDescriptionHelper", "LogXmpp",
    "LogEGL", "LogOpenGL", "LogOverlay", "PacketHandlerLog", "LogPakFile", "LogPerfCounters",
    "LogPhysicsCore", "LogLauncherCheck", "LogLauncherPlatform", "LogRendererCore",
    "LogShaderLibrary", "LogShaders", "LogDistanceField", "LogRenderer", "LogRHI", "LogRigVM",
    "RuntimeAssetCache", "SandboxFile", "LogSignalProcessing", "LogSlate", "LogSlateStyles",
    "LogSlateStyle", "LogMultichannelTCP", "LogSockets", "LogStreamingPlatformFile", "LogUMG",
    "LogUnrealAudio", "LogUnrealAudioDevice", "LogVulkanRHI", "LogVulkan", "LogWebBrowser",
    "LogD3D11RHI", "HighlightRecorder", "WindowsVideoRecordingSystem", "MP4", "WMF",
    "WmfRingBuffer", "LogXAudio2", "LogMaterial", "LogUObjectGlobals", "LogLinker", "LogCook",
    "LogAssetRegistry", "LogEditor", "LogWorld", "LogRender", "LogAudio", "LogInput",
    "LogShaderCompilers", "LogEditorServer", "LogEngine", "LogWorldPartition",
    "LogWorldPartitionStreaming", "LogWorldPartitionActorDesc", "LogWorldPartitionHLOD",
    "LogWorldPartitionStreamingGeneration", "LogWorldPartitionStreamingSource",
    "LogWorldPartitionStreamingPolicy", "LogWorldPartitionStreamingCells",
    "LogWorldPartitionStreamingGrid", "LogWorldPartitionStreamingLayers",
    "LogWorldPartitionStreamingManager", "LogWorldPartitionStreamingSourceManager",
    "LogWorldPartitionStreamingVolume", "LogWorldPartitionStreamingVolumeManager",
    "LogWorldPartitionStreamingVolumePolicy", "LogWorldPartitionStreamingVolumeSource",
    "LogWorldPartitionStreamingVolumeSourceManager",
    "LogWorldPartitionStreamingVolumePolicyManager",
    "LogWorldPartitionStreamingVolumePolicySource",
    "LogWorldPartitionStreamingVolumePolicySourceManager",
    "LogWorldPartitionStreamingVolumePolicyManagerSource",
    "LogWorldPartitionStreamingVolumePolicyManagerSourceManager",
];

/// Lookup set over `KNOWN_CATEGORIES`, built on first use.
pub fn known_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| KNOWN_CATEGORIES.iter().copied().collect())
}

/// Every known category, in declaration order.
pub fn all() -> &'static [&'static str] {
    KNOWN_CATEGORIES
}

/// Exact, case-sensitive membership test.
pub fn is_known(name: &str) -> bool {
    known_set().contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        assert_eq!(known_set().len(), KNOWN_CATEGORIES.len());
    }

    #[test]
    fn test_vocabulary_entries_are_single_tokens() {
        for name in KNOWN_CATEGORIES {
            assert!(!name.is_empty());
            assert!(
                !name.contains(char::is_whitespace) && !name.contains(':'),
                "bad vocabulary entry {name:?}"
            );
        }
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        assert!(is_known("LogTemp"));
        assert!(is_known("LogNet"));
        assert!(is_known("PacketHandlerLog"));
        assert!(!is_known("logtemp"));
        assert!(!is_known("NotARealCategory"));
    }
}
